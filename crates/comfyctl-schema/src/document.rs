//! Typed configuration document.
//!
//! Built once per invocation by [`crate::validate::validate_document`] and
//! immutable afterwards. Every entity that can either declare a value or
//! point at a global declaration is a two-variant enum so later stages match
//! exhaustively instead of probing for keys.

use crate::types::{Category, EntryId};
use serde::Serialize;

/// Keys under `models` that hold paths instead of model lists.
pub const RESERVED_MODEL_KEYS: [&str; 2] = ["dest_dir", "source_dir"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub install: InstallSettings,
    pub models: ModelsSection,
    pub custom_nodes: Vec<CustomNode>,
    pub workflows: Vec<Workflow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallSettings {
    pub comfy_dir: Option<String>,
    pub cpu_only: bool,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            comfy_dir: None,
            cpu_only: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelsSection {
    pub dest_dir: Option<String>,
    pub source_dir: Option<String>,
    /// Categories in declaration order.
    pub categories: Vec<ModelCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCategory {
    pub name: Category,
    pub entries: Vec<ModelEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEntry {
    Concrete(ConcreteModel),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteModel {
    pub id: Option<EntryId>,
    pub value: PrimaryValue,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// The identifier handed to the downloader for a concrete model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryValue {
    Urn(String),
    Url(String),
    Id(String),
    /// A list item written as a plain scalar instead of a mapping.
    Bare(String),
}

impl PrimaryValue {
    /// Pick the primary value with precedence `urn` > `url` > `id`.
    pub fn select(urn: Option<&str>, url: Option<&str>, id: Option<&str>) -> Option<Self> {
        urn.map(|v| Self::Urn(v.to_owned()))
            .or_else(|| url.map(|v| Self::Url(v.to_owned())))
            .or_else(|| id.map(|v| Self::Id(v.to_owned())))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Urn(v) | Self::Url(v) | Self::Id(v) | Self::Bare(v) => v,
        }
    }
}

/// A stand-in for a concrete declaration with `id == target` at global scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub target: EntryId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomNode {
    Concrete(ConcreteNode),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteNode {
    pub id: Option<EntryId>,
    pub url: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    pub name: String,
    pub description: Option<String>,
    /// Passed through untouched; the engine never reads it.
    pub file: Option<String>,
    pub models: Vec<ModelCategory>,
    pub custom_nodes: Vec<CustomNode>,
}

impl Document {
    pub fn workflow(&self, name: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|wf| wf.name == name)
    }
}
