/// Limits applied by the reference evaluator before it parses anything
///
/// Generated expressions stay far below these; the limits exist so that
/// arbitrary input (the `eval` command, the fuzz harness) cannot exhaust the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLimits {
    /// Maximum expression length in bytes
    /// Real usage: ~80 bytes, Limit: 4KB (50x)
    pub max_expression_bytes: usize,

    /// Maximum parenthesis nesting depth
    /// Real usage: ~3 levels, Limit: 100 (30x+)
    pub max_expression_depth: usize,
}

impl Default for ReferenceLimits {
    fn default() -> Self {
        Self {
            max_expression_bytes: 4 * 1024, // 4 KB
            max_expression_depth: 100,
        }
    }
}
