use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use exprfuzz::FuzzError;
use std::io::IsTerminal;

/// Format a FuzzError with fancy terminal output using Ariadne
pub fn format_error(error: &FuzzError) -> String {
    let Some(details) = error.details() else {
        return format!("Error: {}", error);
    };

    let error_type = match error {
        FuzzError::Parse(_) => "Parse error",
        FuzzError::DivisionByZero(_) => "Division by zero",
        _ => "Error",
    };

    let source_len = details.source_text.len();
    if source_len == 0 {
        return format!("{}", error);
    }

    // Labels need at least one character; point at the last one for errors at end of input.
    let start = details.span.start.min(source_len - 1);
    let end = details.span.end.clamp(start + 1, source_len);
    let source_id = "expression".to_string();

    let report = Report::build(ReportKind::Error, &source_id, start)
        .with_config(Config::default().with_color(std::io::stderr().is_terminal()))
        .with_message(format!(
            "{}: {} (column {})",
            error_type, details.message, details.span.col
        ))
        .with_label(
            Label::new((&source_id, start..end))
                .with_message("")
                .with_color(Color::Red),
        );

    let mut output = Vec::new();
    match report.finish().write(
        (&source_id, Source::from(details.source_text.as_ref())),
        &mut output,
    ) {
        Ok(_) => String::from_utf8_lossy(&output).to_string(),
        Err(_) => {
            // Fallback to simple format
            format!("{}", error)
        }
    }
}
