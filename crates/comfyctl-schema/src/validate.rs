//! Structural validation: generic YAML tree to typed [`Document`].
//!
//! The walk never stops at the first defect. Every violation becomes a fatal
//! diagnostic and the offending piece is left out of the returned document,
//! so callers must check [`crate::has_fatal`] before trusting the result.

use crate::diagnostic::{Diagnostic, DiagnosticCode};
use crate::document::{
    ConcreteModel, ConcreteNode, CustomNode, Document, InstallSettings, ModelCategory, ModelEntry,
    ModelsSection, PrimaryValue, Reference, Workflow, RESERVED_MODEL_KEYS,
};
use crate::types::{Category, EntryId};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// Where a list lives. References are only meaningful inside workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Global,
    Workflow,
}

pub fn validate_document(root: &Value) -> (Document, Vec<Diagnostic>) {
    let mut validator = Validator::default();
    let document = validator.document(root);
    (document, validator.diagnostics)
}

#[derive(Default)]
struct Validator {
    diagnostics: Vec<Diagnostic>,
}

impl Validator {
    fn report(&mut self, code: DiagnosticCode, message: String) {
        self.diagnostics.push(Diagnostic::new(code, message));
    }

    fn document(&mut self, root: &Value) -> Document {
        let map = match root {
            Value::Null => return Document::default(),
            Value::Mapping(map) => map,
            other => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("document root must be a mapping, found {}", kind(other)),
                );
                return Document::default();
            }
        };

        let mut document = Document::default();
        for (key, value) in map {
            let Some(key) = self.key_str("document root", key) else {
                continue;
            };
            match key {
                "install" => document.install = self.install(value),
                "models" => document.models = self.models(value),
                "custom_nodes" => {
                    document.custom_nodes =
                        self.custom_node_list("custom_nodes", value, Scope::Global);
                }
                "workflows" => document.workflows = self.workflows(value),
                other => self.report(
                    DiagnosticCode::UnknownKeyError,
                    format!("Unknown top-level key: {other}"),
                ),
            }
        }
        self.category_env_clashes(&document);
        document
    }

    /// Distinct category names must export distinct environment variables.
    /// A workflow sees the global categories plus its own.
    fn category_env_clashes(&mut self, document: &Document) {
        let mut global = BTreeMap::new();
        self.claim_env_vars("models", &document.models.categories, &mut global);
        for workflow in &document.workflows {
            let mut scoped = global.clone();
            let prefix = format!("workflow '{}' models", workflow.name);
            self.claim_env_vars(&prefix, &workflow.models, &mut scoped);
        }
    }

    fn claim_env_vars(
        &mut self,
        prefix: &str,
        categories: &[ModelCategory],
        claimed: &mut BTreeMap<String, Category>,
    ) {
        for category in categories {
            let var = category.name.env_var();
            match claimed.get(&var) {
                Some(owner) if *owner != category.name => self.report(
                    DiagnosticCode::ConflictingCategoryError,
                    format!(
                        "{prefix}.{}: category '{}' clashes with '{owner}' on {var}",
                        category.name, category.name
                    ),
                ),
                Some(_) => {}
                None => {
                    claimed.insert(var, category.name.clone());
                }
            }
        }
    }

    fn install(&mut self, value: &Value) -> InstallSettings {
        let mut install = InstallSettings::default();
        let map = match value {
            Value::Null => return install,
            Value::Mapping(map) => map,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    "install section must be a mapping".to_owned(),
                );
                return install;
            }
        };

        for (key, value) in map {
            let Some(key) = self.key_str("install", key) else {
                continue;
            };
            match key {
                "comfy_dir" => install.comfy_dir = self.optional_string("install.comfy_dir", value),
                "cpu_only" => match value {
                    Value::Null => {}
                    Value::Bool(flag) => install.cpu_only = *flag,
                    _ => self.report(
                        DiagnosticCode::InvalidTypeError,
                        "install.cpu_only must be boolean".to_owned(),
                    ),
                },
                other => self.report(
                    DiagnosticCode::UnknownKeyError,
                    format!("install: unknown key {other}"),
                ),
            }
        }
        install
    }

    fn models(&mut self, value: &Value) -> ModelsSection {
        let mut models = ModelsSection::default();
        let map = match value {
            Value::Null => return models,
            Value::Mapping(map) => map,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    "models section must be a mapping".to_owned(),
                );
                return models;
            }
        };

        for (key, value) in map {
            let Some(key) = self.key_str("models", key) else {
                continue;
            };
            match key {
                "dest_dir" => models.dest_dir = self.optional_string("models.dest_dir", value),
                "source_dir" => {
                    models.source_dir = self.optional_string("models.source_dir", value);
                }
                category => {
                    let path = format!("models.{category}");
                    if let Some(entries) = self.model_list(&path, value, Scope::Global) {
                        models.categories.push(ModelCategory {
                            name: Category::new(category),
                            entries,
                        });
                    }
                }
            }
        }
        models
    }

    fn workflow_models(&mut self, prefix: &str, value: &Value) -> Vec<ModelCategory> {
        let map = match value {
            Value::Null => return Vec::new(),
            Value::Mapping(map) => map,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{prefix}.models must be a mapping"),
                );
                return Vec::new();
            }
        };

        let mut categories = Vec::new();
        for (key, value) in map {
            let Some(key) = self.key_str(&format!("{prefix}.models"), key) else {
                continue;
            };
            let path = format!("{prefix}.models.{key}");
            if RESERVED_MODEL_KEYS.contains(&key) {
                self.report(
                    DiagnosticCode::ReservedKeyError,
                    format!("{path} is only allowed in the top-level models section"),
                );
                continue;
            }
            if let Some(entries) = self.model_list(&path, value, Scope::Workflow) {
                categories.push(ModelCategory {
                    name: Category::new(key),
                    entries,
                });
            }
        }
        categories
    }

    fn model_list(&mut self, path: &str, value: &Value, scope: Scope) -> Option<Vec<ModelEntry>> {
        let Value::Sequence(items) = value else {
            self.report(
                DiagnosticCode::InvalidTypeError,
                format!("{path} must be a list"),
            );
            return None;
        };
        Some(
            items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| self.model_entry(&format!("{path}[{idx}]"), item, scope))
                .collect(),
        )
    }

    fn model_entry(&mut self, path: &str, item: &Value, scope: Scope) -> Option<ModelEntry> {
        let map = match item {
            Value::String(bare) if bare.trim().is_empty() => {
                self.report(
                    DiagnosticCode::MissingFieldError,
                    format!("{path} must not be an empty string"),
                );
                return None;
            }
            Value::String(bare) => {
                return Some(ModelEntry::Concrete(ConcreteModel {
                    id: None,
                    value: PrimaryValue::Bare(bare.clone()),
                    name: None,
                    description: None,
                }));
            }
            Value::Mapping(map) => map,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{path} must be str or mapping"),
                );
                return None;
            }
        };

        let fields = self.entry_fields(path, map)?;
        if let Some(target) = fields.reference {
            let has_content = fields.urn.is_some() || fields.url.is_some() || fields.id.is_some();
            if scope == Scope::Workflow && has_content {
                self.report(
                    DiagnosticCode::ConflictingFieldsError,
                    format!("{path} cannot have both 'ref' and direct content fields"),
                );
                return None;
            }
            return Some(ModelEntry::Reference(Reference {
                target: EntryId::new(target),
            }));
        }

        let Some(value) = PrimaryValue::select(
            fields.urn.as_deref(),
            fields.url.as_deref(),
            fields.id.as_deref(),
        ) else {
            self.report(
                DiagnosticCode::MissingFieldError,
                format!("{path} must have 'urn', 'url', 'id', or 'ref' field"),
            );
            return None;
        };
        Some(ModelEntry::Concrete(ConcreteModel {
            id: fields.id.map(EntryId::new),
            value,
            name: fields.name,
            description: fields.description,
        }))
    }

    fn custom_node_list(&mut self, path: &str, value: &Value, scope: Scope) -> Vec<CustomNode> {
        let items = match value {
            Value::Null => return Vec::new(),
            Value::Sequence(items) => items,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{path} must be a list"),
                );
                return Vec::new();
            }
        };
        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| self.custom_node(&format!("{path}[{idx}]"), item, scope))
            .collect()
    }

    fn custom_node(&mut self, path: &str, item: &Value, scope: Scope) -> Option<CustomNode> {
        let Value::Mapping(map) = item else {
            self.report(
                DiagnosticCode::InvalidTypeError,
                format!("{path} must be mapping with 'url' or 'ref'"),
            );
            return None;
        };

        let fields = self.entry_fields(path, map)?;
        match (fields.reference, fields.url) {
            (Some(_), Some(_)) if scope == Scope::Workflow => {
                self.report(
                    DiagnosticCode::ConflictingFieldsError,
                    format!("{path} cannot have both 'ref' and 'url' fields"),
                );
                None
            }
            (Some(target), _) => Some(CustomNode::Reference(Reference {
                target: EntryId::new(target),
            })),
            (None, Some(url)) => Some(CustomNode::Concrete(ConcreteNode {
                id: fields.id.map(EntryId::new),
                url,
                name: fields.name,
                description: fields.description,
            })),
            (None, None) => {
                let wanted = match scope {
                    Scope::Global => "'url'",
                    Scope::Workflow => "'url' or 'ref'",
                };
                self.report(
                    DiagnosticCode::MissingFieldError,
                    format!("{path} missing {wanted} field"),
                );
                None
            }
        }
    }

    fn workflows(&mut self, value: &Value) -> Vec<Workflow> {
        let items = match value {
            Value::Null => return Vec::new(),
            Value::Sequence(items) => items,
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    "workflows must be a list".to_owned(),
                );
                return Vec::new();
            }
        };

        let mut workflows = Vec::new();
        let mut first_seen: BTreeMap<String, usize> = BTreeMap::new();
        for (idx, item) in items.iter().enumerate() {
            let path = format!("workflows[{idx}]");
            let Some(workflow) = self.workflow(&path, item) else {
                continue;
            };
            if let Some(first) = first_seen.get(&workflow.name) {
                self.report(
                    DiagnosticCode::DuplicateWorkflowError,
                    format!(
                        "{path} name '{}' duplicates workflows[{first}]",
                        workflow.name
                    ),
                );
                continue;
            }
            first_seen.insert(workflow.name.clone(), idx);
            workflows.push(workflow);
        }
        workflows
    }

    fn workflow(&mut self, path: &str, item: &Value) -> Option<Workflow> {
        let Value::Mapping(map) = item else {
            self.report(
                DiagnosticCode::InvalidTypeError,
                format!("{path} must be mapping"),
            );
            return None;
        };

        let name = match map.get("name") {
            None | Some(Value::Null) => {
                self.report(
                    DiagnosticCode::MissingFieldError,
                    format!("{path} missing 'name' field"),
                );
                None
            }
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name.clone()),
            Some(_) => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{path}.name must be a non-empty string"),
                );
                None
            }
        };
        let description = self.field_string(path, map, "description");
        let file = self.field_string(path, map, "file");
        let models = map
            .get("models")
            .map(|value| self.workflow_models(path, value))
            .unwrap_or_default();
        let custom_nodes = map
            .get("custom_nodes")
            .map(|value| {
                self.custom_node_list(&format!("{path}.custom_nodes"), value, Scope::Workflow)
            })
            .unwrap_or_default();

        Some(Workflow {
            name: name?,
            description,
            file,
            models,
            custom_nodes,
        })
    }

    /// Read the shared entry fields. Returns `None` if any of them is mistyped.
    fn entry_fields(&mut self, path: &str, map: &Mapping) -> Option<EntryFields> {
        let before = self.diagnostics.len();
        let fields = EntryFields {
            id: self.field_identifier(path, map, "id"),
            urn: self.field_identifier(path, map, "urn"),
            url: self.field_identifier(path, map, "url"),
            reference: self.field_identifier(path, map, "ref"),
            name: self.field_string(path, map, "name"),
            description: self.field_string(path, map, "description"),
        };
        (self.diagnostics.len() == before).then_some(fields)
    }

    /// Identifier fields accept strings and integers (numeric model ids).
    fn field_identifier(&mut self, path: &str, map: &Mapping, key: &str) -> Option<String> {
        match map.get(key)? {
            Value::Null => None,
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{path}.{key} must be a non-empty string"),
                );
                None
            }
        }
    }

    fn field_string(&mut self, path: &str, map: &Mapping, key: &str) -> Option<String> {
        let value = map.get(key)?;
        self.optional_string(&format!("{path}.{key}"), value)
    }

    fn optional_string(&mut self, path: &str, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            _ => {
                self.report(
                    DiagnosticCode::InvalidTypeError,
                    format!("{path} must be a string"),
                );
                None
            }
        }
    }

    fn key_str<'v>(&mut self, context: &str, key: &'v Value) -> Option<&'v str> {
        if let Value::String(key) = key {
            return Some(key.as_str());
        }
        self.report(
            DiagnosticCode::InvalidTypeError,
            format!("{context}: keys must be strings, found {}", kind(key)),
        );
        None
    }
}

struct EntryFields {
    id: Option<String>,
    urn: Option<String>,
    url: Option<String>,
    reference: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::has_fatal;
    use crate::parse::parse_document_str;

    fn validate(input: &str) -> (Document, Vec<Diagnostic>) {
        validate_document(&parse_document_str(input).unwrap())
    }

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn empty_document_is_valid() {
        let (doc, diagnostics) = validate("");
        assert!(diagnostics.is_empty());
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn full_document_builds_typed_model() {
        let (doc, diagnostics) = validate(
            r#"
install:
  comfy_dir: /opt/ComfyUI
  cpu_only: false
models:
  dest_dir: /models
  source_dir: /seed
  checkpoints:
    - id: base
      urn: urn:air:sdxl:checkpoint:civitai:101055
      name: SDXL base
    - "443821"
  loras:
    - url: https://example.com/lora.safetensors
custom_nodes:
  - id: manager
    url: https://github.com/ltdrdata/ComfyUI-Manager
workflows:
  - name: portrait
    description: Portrait pipeline
    file: workflows/portrait.json
    models:
      checkpoints:
        - ref: base
    custom_nodes:
      - ref: manager
"#,
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(doc.install.comfy_dir.as_deref(), Some("/opt/ComfyUI"));
        assert!(!doc.install.cpu_only);
        assert_eq!(doc.models.dest_dir.as_deref(), Some("/models"));
        assert_eq!(doc.models.source_dir.as_deref(), Some("/seed"));
        assert_eq!(doc.models.categories.len(), 2);
        assert_eq!(doc.models.categories[0].name, "checkpoints");
        assert_eq!(doc.models.categories[1].name, "loras");

        let ModelEntry::Concrete(base) = &doc.models.categories[0].entries[0] else {
            panic!("expected concrete entry");
        };
        assert_eq!(base.id.as_ref().map(EntryId::as_str), Some("base"));
        assert_eq!(base.value.as_str(), "urn:air:sdxl:checkpoint:civitai:101055");
        assert_eq!(base.name.as_deref(), Some("SDXL base"));
        assert_eq!(
            doc.models.categories[0].entries[1],
            ModelEntry::Concrete(ConcreteModel {
                id: None,
                value: PrimaryValue::Bare("443821".to_owned()),
                name: None,
                description: None,
            })
        );

        let wf = &doc.workflows[0];
        assert_eq!(wf.file.as_deref(), Some("workflows/portrait.json"));
        assert_eq!(
            wf.models[0].entries[0],
            ModelEntry::Reference(Reference {
                target: EntryId::new("base")
            })
        );
        assert!(matches!(wf.custom_nodes[0], CustomNode::Reference(_)));
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let (doc, diagnostics) = validate(
            r"
models:
  checkpoints:
    - id: 443821
",
        );
        assert!(diagnostics.is_empty());
        let ModelEntry::Concrete(entry) = &doc.models.categories[0].entries[0] else {
            panic!("expected concrete entry");
        };
        assert_eq!(entry.value, PrimaryValue::Id("443821".to_owned()));
    }

    #[test]
    fn collects_every_structural_defect() {
        let (_, diagnostics) = validate(
            r"
extra: true
install:
  cpu_only: maybe
  gpu: true
models:
  checkpoints: not-a-list
  loras:
    - name: no content
    - 42
custom_nodes:
  - url: https://example.com/ok
  - name: missing url
workflows:
  - description: no name
  - name: wf
    models:
      loras:
        - ref: x
          urn: urn:conflict
    custom_nodes:
      - ref: a
        url: https://example.com/conflict
",
        );
        assert!(has_fatal(&diagnostics));
        let msgs = messages(&diagnostics);
        assert_eq!(
            msgs,
            vec![
                "Unknown top-level key: extra",
                "install.cpu_only must be boolean",
                "install: unknown key gpu",
                "models.checkpoints must be a list",
                "models.loras[0] must have 'urn', 'url', 'id', or 'ref' field",
                "models.loras[1] must be str or mapping",
                "custom_nodes[1] missing 'url' field",
                "workflows[0] missing 'name' field",
                "workflows[1].models.loras[0] cannot have both 'ref' and direct content fields",
                "workflows[1].custom_nodes[0] cannot have both 'ref' and 'url' fields",
            ]
        );
        assert!(diagnostics.iter().all(Diagnostic::is_fatal));
    }

    #[test]
    fn non_mapping_root_is_fatal() {
        let (_, diagnostics) = validate("- a\n- b\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::InvalidTypeError);
        assert!(diagnostics[0].message.contains("found list"));
    }

    #[test]
    fn wrong_section_types_are_reported() {
        let (_, diagnostics) = validate(
            r"
install: []
models: []
custom_nodes: {}
workflows: {}
",
        );
        assert_eq!(
            messages(&diagnostics),
            vec![
                "install section must be a mapping",
                "models section must be a mapping",
                "custom_nodes must be a list",
                "workflows must be a list",
            ]
        );
    }

    #[test]
    fn null_sections_are_absent() {
        let (doc, diagnostics) = validate("install:\nmodels:\ncustom_nodes:\nworkflows:\n");
        assert!(diagnostics.is_empty());
        assert!(doc.install.cpu_only);
        assert!(doc.models.categories.is_empty());
    }

    #[test]
    fn global_ref_is_left_for_index_stage() {
        let (doc, diagnostics) = validate(
            r"
models:
  checkpoints:
    - ref: other
      urn: urn:x
custom_nodes:
  - ref: other
    url: https://example.com
",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert!(matches!(
            doc.models.categories[0].entries[0],
            ModelEntry::Reference(_)
        ));
        assert!(matches!(doc.custom_nodes[0], CustomNode::Reference(_)));
    }

    #[test]
    fn workflow_custom_node_needs_url_or_ref() {
        let (_, diagnostics) = validate(
            r"
workflows:
  - name: wf
    custom_nodes:
      - name: nothing
      - plain-string
",
        );
        assert_eq!(
            messages(&diagnostics),
            vec![
                "workflows[0].custom_nodes[0] missing 'url' or 'ref' field",
                "workflows[0].custom_nodes[1] must be mapping with 'url' or 'ref'",
            ]
        );
    }

    #[test]
    fn duplicate_workflow_names_are_fatal() {
        let (doc, diagnostics) = validate(
            r"
workflows:
  - name: wf
  - name: other
  - name: wf
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::DuplicateWorkflowError);
        assert_eq!(
            diagnostics[0].message,
            "workflows[2] name 'wf' duplicates workflows[0]"
        );
        assert_eq!(doc.workflows.len(), 2);
    }

    #[test]
    fn reserved_keys_rejected_inside_workflows() {
        let (_, diagnostics) = validate(
            r"
workflows:
  - name: wf
    models:
      dest_dir: /elsewhere
",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, DiagnosticCode::ReservedKeyError);
    }

    #[test]
    fn mistyped_entry_fields_are_reported() {
        let (_, diagnostics) = validate(
            r"
models:
  checkpoints:
    - id: [1, 2]
      urn: urn:x
    - urn: urn:y
      name: 5
",
        );
        assert_eq!(
            messages(&diagnostics),
            vec![
                "models.checkpoints[0].id must be a non-empty string",
                "models.checkpoints[1].name must be a string",
            ]
        );
    }

    #[test]
    fn categories_sharing_an_env_var_are_fatal() {
        let (_, diagnostics) = validate(
            r"
models:
  upscale-models:
    - urn:a
  upscale_models:
    - urn:b
  Loras:
    - urn:c
  loras:
    - urn:d
",
        );
        assert!(diagnostics
            .iter()
            .all(|d| d.code == DiagnosticCode::ConflictingCategoryError));
        assert_eq!(
            messages(&diagnostics),
            vec![
                "models.upscale_models: category 'upscale_models' clashes with 'upscale-models' on CIVITAI_UPSCALE_MODELS",
                "models.loras: category 'loras' clashes with 'Loras' on CIVITAI_LORAS",
            ]
        );
    }

    #[test]
    fn workflow_category_clashing_with_global_is_fatal() {
        let (_, diagnostics) = validate(
            r"
workflows:
  - name: wf
    models:
      Checkpoints:
        - urn:x
  - name: other
    models:
      checkpoints:
        - urn:y
models:
  checkpoints:
    - urn:z
",
        );
        assert_eq!(
            messages(&diagnostics),
            vec![
                "workflow 'wf' models.Checkpoints: category 'Checkpoints' clashes with 'checkpoints' on CIVITAI_CHECKPOINTS",
            ]
        );
        assert!(has_fatal(&diagnostics));
    }

    #[test]
    fn workflow_only_categories_are_scoped_per_workflow() {
        let (_, diagnostics) = validate(
            r"
workflows:
  - name: first
    models:
      vae:
        - urn:a
  - name: second
    models:
      VAE:
        - urn:b
      vae:
        - urn:c
",
        );
        assert_eq!(
            messages(&diagnostics),
            vec!["workflow 'second' models.vae: category 'vae' clashes with 'VAE' on CIVITAI_VAE"]
        );
    }

    #[test]
    fn merge_keys_are_applied_before_validation() {
        let (doc, diagnostics) = validate(
            r"
models:
  checkpoints:
    - &base
      id: base
      urn: urn:base
      name: Base
  loras:
    - <<: *base
      id: lora1
",
        );
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let ModelEntry::Concrete(lora) = &doc.models.categories[1].entries[0] else {
            panic!("expected concrete entry");
        };
        assert_eq!(lora.id.as_ref().map(EntryId::as_str), Some("lora1"));
        assert_eq!(lora.value, PrimaryValue::Urn("urn:base".to_owned()));
        assert_eq!(lora.name.as_deref(), Some("Base"));
    }

    #[test]
    fn non_string_keys_are_reported() {
        let (_, diagnostics) = validate("models:\n  7: []\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].message,
            "models: keys must be strings, found number"
        );
    }
}
