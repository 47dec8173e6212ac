//! Global lookup tables for reference targets.
//!
//! Only global declarations are indexed. Resolution never consults merged
//! or workflow-local lists, which keeps every reference exactly one hop from
//! its target.

use comfyctl_schema::{
    ConcreteModel, ConcreteNode, CustomNode, Diagnostic, DiagnosticCode, Document, ModelEntry,
};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct GlobalIndex<'d> {
    /// Category name to (`id` to declaration, position).
    models: BTreeMap<&'d str, BTreeMap<&'d str, (usize, &'d ConcreteModel)>>,
    custom_nodes: BTreeMap<&'d str, (usize, &'d ConcreteNode)>,
}

impl<'d> GlobalIndex<'d> {
    /// Index every global declaration carrying an `id`.
    ///
    /// Duplicate ids and global entries that carry `ref` are fatal; the
    /// returned index is only meaningful when no fatal diagnostic was emitted.
    pub fn build(document: &'d Document) -> (Self, Vec<Diagnostic>) {
        let mut index = Self::default();
        let mut diagnostics = Vec::new();

        for category in &document.models.categories {
            let ids = index.models.entry(category.name.as_str()).or_default();
            for (position, entry) in category.entries.iter().enumerate() {
                let path = format!("models.{}[{position}]", category.name);
                match entry {
                    ModelEntry::Reference(reference) => diagnostics.push(Diagnostic::new(
                        DiagnosticCode::InvalidGlobalReferenceError,
                        format!(
                            "{path} carries ref '{}'; references are only allowed inside workflows",
                            reference.target
                        ),
                    )),
                    ModelEntry::Concrete(model) => {
                        let Some(id) = &model.id else {
                            continue;
                        };
                        if let Some((first, _)) = ids.get(id.as_str()) {
                            diagnostics.push(Diagnostic::new(
                                DiagnosticCode::DuplicateIdError,
                                format!(
                                    "{path} duplicates id '{id}' declared at models.{}[{first}]",
                                    category.name
                                ),
                            ));
                        } else {
                            ids.insert(id.as_str(), (position, model));
                        }
                    }
                }
            }
        }

        for (position, node) in document.custom_nodes.iter().enumerate() {
            let path = format!("custom_nodes[{position}]");
            match node {
                CustomNode::Reference(reference) => diagnostics.push(Diagnostic::new(
                    DiagnosticCode::InvalidGlobalReferenceError,
                    format!(
                        "{path} carries ref '{}'; references are only allowed inside workflows",
                        reference.target
                    ),
                )),
                CustomNode::Concrete(concrete) => {
                    let Some(id) = &concrete.id else {
                        continue;
                    };
                    if let Some((first, _)) = index.custom_nodes.get(id.as_str()) {
                        diagnostics.push(Diagnostic::new(
                            DiagnosticCode::DuplicateIdError,
                            format!("{path} duplicates id '{id}' declared at custom_nodes[{first}]"),
                        ));
                    } else {
                        index.custom_nodes.insert(id.as_str(), (position, concrete));
                    }
                }
            }
        }

        (index, diagnostics)
    }

    pub fn model(&self, category: &str, id: &str) -> Option<&'d ConcreteModel> {
        self.models
            .get(category)
            .and_then(|ids| ids.get(id))
            .map(|(_, model)| *model)
    }

    pub fn custom_node(&self, id: &str) -> Option<&'d ConcreteNode> {
        self.custom_nodes.get(id).map(|(_, node)| *node)
    }

    /// Number of referenceable model declarations across all categories.
    pub fn model_count(&self) -> usize {
        self.models.values().map(BTreeMap::len).sum()
    }

    pub fn custom_node_count(&self) -> usize {
        self.custom_nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comfyctl_schema::{has_fatal, parse_document_str, validate_document};

    fn document(input: &str) -> Document {
        let (doc, diagnostics) = validate_document(&parse_document_str(input).unwrap());
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        doc
    }

    #[test]
    fn indexes_entries_with_ids_only() {
        let doc = document(
            r"
models:
  checkpoints:
    - id: base
      urn: urn:air:sdxl:checkpoint:civitai:101055
    - urn: urn:air:sdxl:checkpoint:civitai:999
    - plain-value
  loras:
    - id: detail
      url: https://example.com/detail.safetensors
custom_nodes:
  - id: manager
    url: https://github.com/ltdrdata/ComfyUI-Manager
  - url: https://github.com/anon/node
",
        );
        let (index, diagnostics) = GlobalIndex::build(&doc);
        assert!(diagnostics.is_empty());
        assert_eq!(index.model_count(), 2);
        assert_eq!(index.custom_node_count(), 1);
        assert_eq!(
            index.model("checkpoints", "base").unwrap().value.as_str(),
            "urn:air:sdxl:checkpoint:civitai:101055"
        );
        assert!(index.model("loras", "base").is_none());
        assert!(index.model("vae", "base").is_none());
        assert_eq!(
            index.custom_node("manager").unwrap().url,
            "https://github.com/ltdrdata/ComfyUI-Manager"
        );
    }

    #[test]
    fn same_id_in_different_categories_is_allowed() {
        let doc = document(
            r"
models:
  checkpoints:
    - id: shared
      urn: urn:a
  loras:
    - id: shared
      urn: urn:b
",
        );
        let (index, diagnostics) = GlobalIndex::build(&doc);
        assert!(diagnostics.is_empty());
        assert_eq!(index.model("checkpoints", "shared").unwrap().value.as_str(), "urn:a");
        assert_eq!(index.model("loras", "shared").unwrap().value.as_str(), "urn:b");
    }

    #[test]
    fn duplicate_model_id_is_fatal() {
        let doc = document(
            r"
models:
  checkpoints:
    - id: a
      urn: urn:first
    - id: b
      urn: urn:other
    - id: a
      urn: urn:second
",
        );
        let (index, diagnostics) = GlobalIndex::build(&doc);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateIdError);
        assert_eq!(
            diagnostics[0].message,
            "models.checkpoints[2] duplicates id 'a' declared at models.checkpoints[0]"
        );
        assert_eq!(index.model("checkpoints", "a").unwrap().value.as_str(), "urn:first");
    }

    #[test]
    fn duplicate_custom_node_id_is_fatal() {
        let doc = document(
            r"
custom_nodes:
  - id: n
    url: https://example.com/one
  - id: n
    url: https://example.com/two
",
        );
        let (_, diagnostics) = GlobalIndex::build(&doc);
        assert!(has_fatal(&diagnostics));
        assert_eq!(
            diagnostics[0].message,
            "custom_nodes[1] duplicates id 'n' declared at custom_nodes[0]"
        );
    }

    #[test]
    fn global_references_are_fatal() {
        let doc = document(
            r"
models:
  checkpoints:
    - id: base
      urn: urn:a
    - ref: base
custom_nodes:
  - ref: manager
",
        );
        let (_, diagnostics) = GlobalIndex::build(&doc);
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::InvalidGlobalReferenceError));
        assert_eq!(
            diagnostics[0].message,
            "models.checkpoints[1] carries ref 'base'; references are only allowed inside workflows"
        );
    }

    #[test]
    fn workflow_entries_are_not_indexed() {
        let doc = document(
            r"
workflows:
  - name: wf
    models:
      checkpoints:
        - id: local
          urn: urn:local
    custom_nodes:
      - id: local-node
        url: https://example.com/local
",
        );
        let (index, diagnostics) = GlobalIndex::build(&doc);
        assert!(diagnostics.is_empty());
        assert!(index.model("checkpoints", "local").is_none());
        assert!(index.custom_node("local-node").is_none());
    }
}
