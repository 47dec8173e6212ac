//! Reference resolution over merged lists.
//!
//! Every `ref` is looked up in the [`GlobalIndex`] of its own kind and
//! category. A miss is a warning and the entry is dropped; it never aborts
//! resolution.

use crate::index::GlobalIndex;
use crate::manifest::{ResolvedCategory, ResolvedManifest, ResolvedModel, ResolvedNode};
use crate::merge::MergedLists;
use comfyctl_schema::{CustomNode, Diagnostic, DiagnosticCode, ModelEntry};
use tracing::debug;

pub fn resolve(
    merged: &MergedLists<'_>,
    index: &GlobalIndex<'_>,
) -> (ResolvedManifest, Vec<Diagnostic>) {
    let mut manifest = ResolvedManifest::default();
    let mut diagnostics = Vec::new();

    for category in &merged.categories {
        let mut entries = Vec::with_capacity(category.entries.len());
        for merged_entry in &category.entries {
            match merged_entry.entry {
                ModelEntry::Concrete(model) => entries.push(ResolvedModel {
                    value: model.value.as_str().to_owned(),
                    name: model.name.clone(),
                    description: model.description.clone(),
                    via_ref: None,
                }),
                ModelEntry::Reference(reference) => {
                    match index.model(category.name.as_str(), reference.target.as_str()) {
                        Some(target) => {
                            debug!(
                                "resolved {} -> {}",
                                merged_entry.path(category.name),
                                target.value.as_str()
                            );
                            entries.push(ResolvedModel {
                                value: target.value.as_str().to_owned(),
                                name: target.name.clone(),
                                description: target.description.clone(),
                                via_ref: Some(reference.target.clone()),
                            });
                        }
                        None => diagnostics.push(Diagnostic::new(
                            DiagnosticCode::UnresolvedReferenceWarning,
                            format!(
                                "{}: ref '{}' not found in models.{}",
                                merged_entry.path(category.name),
                                reference.target,
                                category.name
                            ),
                        )),
                    }
                }
            }
        }
        if !entries.is_empty() {
            manifest.categories.push(ResolvedCategory {
                name: category.name.clone(),
                entries,
            });
        }
    }

    for merged_node in &merged.custom_nodes {
        match merged_node.entry {
            CustomNode::Concrete(node) => manifest.custom_nodes.push(ResolvedNode {
                url: node.url.clone(),
                name: node.name.clone(),
                description: node.description.clone(),
                via_ref: None,
            }),
            CustomNode::Reference(reference) => match index.custom_node(reference.target.as_str())
            {
                Some(target) => manifest.custom_nodes.push(ResolvedNode {
                    url: target.url.clone(),
                    name: target.name.clone(),
                    description: target.description.clone(),
                    via_ref: Some(reference.target.clone()),
                }),
                None => diagnostics.push(Diagnostic::new(
                    DiagnosticCode::UnresolvedReferenceWarning,
                    format!(
                        "{}: ref '{}' not found in global custom_nodes",
                        merged_node.path(),
                        reference.target
                    ),
                )),
            },
        }
    }

    (manifest, diagnostics)
}
