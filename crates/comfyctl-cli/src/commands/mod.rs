pub mod completions;
pub mod install;
pub mod man_pages;
pub mod resolve;
pub mod start;
pub mod validate;

use comfyctl_core::{Engine, Resolution};
use comfyctl_schema::{Diagnostic, Severity};
use console::Style;
use std::path::Path;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CONFIG_UNREADABLE: u8 = 2;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

/// Resolve the configuration at `config`, mapping I/O failures to an error
/// message the exit-code mapping in `main` recognizes.
pub fn load_resolution(
    engine: &Engine,
    config: &Path,
    workflow: Option<&str>,
) -> Result<Resolution, String> {
    engine
        .resolve_file(config, workflow)
        .map_err(|e| format!("{e} ({})", config.display()))
}

pub fn colorize_severity(severity: Severity) -> String {
    let label = severity.as_str();
    match severity {
        Severity::Fatal => Style::new().red().bold().apply_to(label).to_string(),
        Severity::Warning => Style::new().yellow().apply_to(label).to_string(),
    }
}

pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    format!(
        "[{}] {}: {}",
        colorize_severity(diagnostic.severity),
        diagnostic.code,
        diagnostic.message
    )
}

/// Print every diagnostic to stderr, fatal and warning alike.
pub fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("  {}", format_diagnostic(diagnostic));
    }
}
