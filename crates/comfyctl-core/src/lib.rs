//! Resolution engine for comfyctl configuration documents.
//!
//! This crate takes a validated [`comfyctl_schema::Document`] through the back
//! half of the pipeline: global id indexing, workflow overlay merging,
//! single-hop reference resolution, and export of the resulting
//! [`InstallPlan`] as the environment consumed by the installer script.
//! [`Engine`] runs the whole pipeline from configuration text.

pub mod engine;
pub mod identity;
pub mod index;
pub mod manifest;
pub mod merge;
pub mod plan;
pub mod resolve;

pub use engine::{Engine, Resolution};
pub use identity::{compute_plan_digest, PlanDigest};
pub use index::GlobalIndex;
pub use manifest::{
    ExportedManifest, ResolvedCategory, ResolvedManifest, ResolvedModel, ResolvedNode,
};
pub use merge::{merge, MergedLists, Origin};
pub use plan::{ExportError, InstallPlan};
pub use resolve::resolve;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Load(#[from] comfyctl_schema::LoadError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}
