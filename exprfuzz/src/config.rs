use crate::comparator::Tolerance;
use crate::generator::GeneratorConfig;
use crate::resource_limits::ReferenceLimits;
use std::path::PathBuf;
use std::time::Duration;

/// Binary invoked when none is configured
pub const DEFAULT_BINARY: &str = "./test";

/// Trials per run
pub const DEFAULT_ITERATIONS: usize = 100;

/// Settings for one differential run
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzConfig {
    /// Executable of the system under test
    pub binary: PathBuf,

    /// Number of trials; the run stops earlier on the first mismatch
    pub iterations: usize,

    /// Seed for the expression generator, drawn from the OS when absent
    pub seed: Option<u64>,

    pub tolerance: Tolerance,

    /// Kill the system under test after this long. `None` waits forever.
    pub timeout: Option<Duration>,

    /// Skip trials whose reference value divides by zero instead of aborting
    pub skip_undefined: bool,

    pub generator: GeneratorConfig,

    pub limits: ReferenceLimits,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            tolerance: Tolerance::default(),
            timeout: None,
            skip_undefined: false,
            generator: GeneratorConfig::default(),
            limits: ReferenceLimits::default(),
        }
    }
}
