use crate::index::GlobalIndex;
use crate::merge::merge;
use crate::plan::InstallPlan;
use crate::resolve::resolve;
use crate::CoreError;
use comfyctl_schema::{
    has_fatal, parse_document_str, read_config_file, validate_document, Diagnostic, Document,
};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Every defect found, in pipeline order.
    pub diagnostics: Vec<Diagnostic>,
    /// `None` whenever `diagnostics` contains a fatal entry.
    pub plan: Option<InstallPlan>,
}

impl Resolution {
    fn halted(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            plan: None,
        }
    }

    pub fn is_success(&self) -> bool {
        !has_fatal(&self.diagnostics)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_fatal())
    }

    pub fn fatal(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_fatal())
    }
}

/// Stateless entry point to the resolution pipeline.
///
/// Each call parses, validates, indexes, merges and resolves from scratch;
/// nothing is cached between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `text` for the optional `workflow` overlay.
    pub fn resolve(&self, text: &str, workflow: Option<&str>) -> Resolution {
        let mut diagnostics = Vec::new();
        let Some(document) = prepare(text, &mut diagnostics) else {
            return Resolution::halted(diagnostics);
        };
        let Some(index) = build_index(&document, &mut diagnostics) else {
            return Resolution::halted(diagnostics);
        };

        let plan = plan_for(&document, &index, workflow, &mut diagnostics);
        mirror_warnings(&diagnostics);
        Resolution {
            diagnostics,
            plan: Some(plan),
        }
    }

    /// Validate `text` across every declared workflow.
    ///
    /// Unresolved references are reported for all workflows, not only a
    /// selected one. The returned plan is the global-only plan.
    pub fn check(&self, text: &str) -> Resolution {
        let mut diagnostics = Vec::new();
        let Some(document) = prepare(text, &mut diagnostics) else {
            return Resolution::halted(diagnostics);
        };
        let Some(index) = build_index(&document, &mut diagnostics) else {
            return Resolution::halted(diagnostics);
        };

        let plan = plan_for(&document, &index, None, &mut diagnostics);
        for workflow in &document.workflows {
            let (merged, merge_diagnostics) = merge(&document, Some(workflow.name.as_str()));
            let (_, resolve_diagnostics) = resolve(&merged, &index);
            diagnostics.extend(merge_diagnostics);
            diagnostics.extend(resolve_diagnostics);
        }
        debug!(
            "checked {} workflow(s): {} diagnostic(s)",
            document.workflows.len(),
            diagnostics.len()
        );
        mirror_warnings(&diagnostics);
        Resolution {
            diagnostics,
            plan: Some(plan),
        }
    }

    pub fn resolve_file(
        &self,
        path: impl AsRef<Path>,
        workflow: Option<&str>,
    ) -> Result<Resolution, CoreError> {
        let path = path.as_ref();
        info!("resolving configuration from {}", path.display());
        let text = read_config_file(path)?;
        Ok(self.resolve(&text, workflow))
    }

    pub fn check_file(&self, path: impl AsRef<Path>) -> Result<Resolution, CoreError> {
        let path = path.as_ref();
        info!("validating configuration from {}", path.display());
        let text = read_config_file(path)?;
        Ok(self.check(&text))
    }
}

/// Parse and validate. `None` means a fatal diagnostic was recorded.
fn prepare(text: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<Document> {
    let tree = match parse_document_str(text) {
        Ok(tree) => tree,
        Err(diagnostic) => {
            debug!("parse failed: {}", diagnostic.message);
            diagnostics.push(diagnostic);
            return None;
        }
    };

    let (document, structural) = validate_document(&tree);
    debug!(
        "validated document: {} categories, {} custom nodes, {} workflows, {} defects",
        document.models.categories.len(),
        document.custom_nodes.len(),
        document.workflows.len(),
        structural.len()
    );
    let halt = has_fatal(&structural);
    diagnostics.extend(structural);
    (!halt).then_some(document)
}

fn build_index<'d>(
    document: &'d Document,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<GlobalIndex<'d>> {
    let (index, index_diagnostics) = GlobalIndex::build(document);
    debug!(
        "indexed {} model id(s) and {} custom node id(s)",
        index.model_count(),
        index.custom_node_count()
    );
    let halt = has_fatal(&index_diagnostics);
    diagnostics.extend(index_diagnostics);
    (!halt).then_some(index)
}

fn plan_for(
    document: &Document,
    index: &GlobalIndex<'_>,
    workflow: Option<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> InstallPlan {
    let (merged, merge_diagnostics) = merge(document, workflow);
    diagnostics.extend(merge_diagnostics);
    if let Some(wf) = merged.workflow {
        info!("overlaying workflow '{}'", wf.name);
    }

    let (manifest, resolve_diagnostics) = resolve(&merged, index);
    diagnostics.extend(resolve_diagnostics);
    debug!(
        "resolved {} categories and {} custom node(s)",
        manifest.categories.len(),
        manifest.custom_nodes.len()
    );

    InstallPlan {
        install: document.install.clone(),
        dest_dir: document.models.dest_dir.clone(),
        source_dir: document.models.source_dir.clone(),
        workflow: merged.workflow.map(|wf| wf.name.clone()),
        manifest,
    }
}

fn mirror_warnings(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics.iter().filter(|d| !d.is_fatal()) {
        debug!("{}: {}", diagnostic.code, diagnostic.message);
    }
}
