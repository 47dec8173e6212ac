use crate::diagnostic::{Diagnostic, DiagnosticCode};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse configuration text into a generic YAML tree.
///
/// No semantic checks happen here. `<<` merge keys are expanded. A document
/// that holds nothing but whitespace, comments, or document markers is the
/// empty document.
pub fn parse_document_str(input: &str) -> Result<Value, Diagnostic> {
    if is_blank_document(input) {
        return Ok(Value::Null);
    }
    let mut value: Value = serde_yaml::from_str(input).map_err(parse_error)?;
    value.apply_merge().map_err(parse_error)?;
    Ok(value)
}

fn parse_error(e: serde_yaml::Error) -> Diagnostic {
    Diagnostic::new(
        DiagnosticCode::ParseError,
        format!("YAML parsing error: {e}"),
    )
}

pub fn read_config_file(path: impl AsRef<Path>) -> Result<String, LoadError> {
    Ok(fs::read_to_string(path)?)
}

fn is_blank_document(input: &str) -> bool {
    input.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}
