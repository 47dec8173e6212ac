//! Configuration document schema for comfyctl.
//!
//! This crate covers the front half of the resolution pipeline: YAML parsing
//! into a generic tree (`parse_document_str`), structural validation of that
//! tree into a typed [`Document`] (`validate_document`), and the
//! [`Diagnostic`] type every stage reports through.

pub mod diagnostic;
pub mod document;
pub mod parse;
pub mod types;
pub mod validate;

pub use diagnostic::{has_fatal, Diagnostic, DiagnosticCode, Severity};
pub use document::{
    ConcreteModel, ConcreteNode, CustomNode, Document, InstallSettings, ModelCategory, ModelEntry,
    ModelsSection, PrimaryValue, Reference, Workflow, RESERVED_MODEL_KEYS,
};
pub use parse::{parse_document_str, read_config_file, LoadError};
pub use types::{Category, EntryId, PlanId, ShortId};
pub use validate::validate_document;
