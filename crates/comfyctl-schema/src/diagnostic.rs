//! Diagnostics collected while validating and resolving a configuration.
//!
//! Defects inside a document are data, not `Err`s: every stage appends to a
//! `Vec<Diagnostic>` that is returned to the caller alongside its result.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fatal,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fatal => "fatal",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defect class. The severity of each class is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    ParseError,
    UnknownKeyError,
    InvalidTypeError,
    MissingFieldError,
    ConflictingFieldsError,
    ReservedKeyError,
    ConflictingCategoryError,
    DuplicateWorkflowError,
    DuplicateIdError,
    InvalidGlobalReferenceError,
    WorkflowNotFoundWarning,
    UnresolvedReferenceWarning,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::UnknownKeyError => "UnknownKeyError",
            Self::InvalidTypeError => "InvalidTypeError",
            Self::MissingFieldError => "MissingFieldError",
            Self::ConflictingFieldsError => "ConflictingFieldsError",
            Self::ReservedKeyError => "ReservedKeyError",
            Self::ConflictingCategoryError => "ConflictingCategoryError",
            Self::DuplicateWorkflowError => "DuplicateWorkflowError",
            Self::DuplicateIdError => "DuplicateIdError",
            Self::InvalidGlobalReferenceError => "InvalidGlobalReferenceError",
            Self::WorkflowNotFoundWarning => "WorkflowNotFoundWarning",
            Self::UnresolvedReferenceWarning => "UnresolvedReferenceWarning",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::WorkflowNotFoundWarning | Self::UnresolvedReferenceWarning => Severity::Warning,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

pub fn has_fatal(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_fatal)
}
