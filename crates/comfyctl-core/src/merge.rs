//! Workflow selection and list merging.
//!
//! Merging is concatenation: global entries in declared order, followed by
//! the selected workflow's entries for the same category. Nothing is
//! replaced or deduplicated.

use comfyctl_schema::{
    Category, CustomNode, Diagnostic, DiagnosticCode, Document, ModelCategory, ModelEntry,
    Workflow,
};

/// Which list an entry was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Global,
    /// Position of the workflow in the document's `workflows` list.
    Workflow(usize),
}

impl Origin {
    fn prefix(self) -> String {
        match self {
            Self::Global => String::new(),
            Self::Workflow(index) => format!("workflows[{index}]."),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MergedModel<'d> {
    pub origin: Origin,
    pub position: usize,
    pub entry: &'d ModelEntry,
}

impl MergedModel<'_> {
    /// Dotted path of the declaration, e.g. `workflows[0].models.loras[2]`.
    pub fn path(&self, category: &Category) -> String {
        format!(
            "{}models.{category}[{}]",
            self.origin.prefix(),
            self.position
        )
    }
}

#[derive(Debug, Clone)]
pub struct MergedCategory<'d> {
    pub name: &'d Category,
    pub entries: Vec<MergedModel<'d>>,
}

#[derive(Debug, Clone, Copy)]
pub struct MergedNode<'d> {
    pub origin: Origin,
    pub position: usize,
    pub entry: &'d CustomNode,
}

impl MergedNode<'_> {
    pub fn path(&self) -> String {
        format!("{}custom_nodes[{}]", self.origin.prefix(), self.position)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergedLists<'d> {
    /// The workflow that was overlaid, if any was selected and found.
    pub workflow: Option<&'d Workflow>,
    pub categories: Vec<MergedCategory<'d>>,
    pub custom_nodes: Vec<MergedNode<'d>>,
}

/// Overlay the workflow named `selected` (exact match) on the global lists.
///
/// An unknown name is a warning; the result then equals the global lists.
pub fn merge<'d>(
    document: &'d Document,
    selected: Option<&str>,
) -> (MergedLists<'d>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let workflow = selected.and_then(|name| {
        let found = document
            .workflows
            .iter()
            .enumerate()
            .find(|(_, wf)| wf.name == name);
        if found.is_none() {
            diagnostics.push(Diagnostic::new(
                DiagnosticCode::WorkflowNotFoundWarning,
                format!("workflow '{name}' not found; installing global configuration only"),
            ));
        }
        found
    });

    let mut merged = MergedLists::default();
    append_categories(&mut merged.categories, &document.models.categories, Origin::Global);
    append_nodes(&mut merged.custom_nodes, &document.custom_nodes, Origin::Global);

    if let Some((index, wf)) = workflow {
        let origin = Origin::Workflow(index);
        append_categories(&mut merged.categories, &wf.models, origin);
        append_nodes(&mut merged.custom_nodes, &wf.custom_nodes, origin);
        merged.workflow = Some(wf);
    }

    (merged, diagnostics)
}

fn append_categories<'d>(
    merged: &mut Vec<MergedCategory<'d>>,
    categories: &'d [ModelCategory],
    origin: Origin,
) {
    for category in categories {
        let entries = category
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| MergedModel {
                origin,
                position,
                entry,
            });
        if let Some(existing) = merged.iter_mut().find(|c| *c.name == category.name) {
            existing.entries.extend(entries);
        } else {
            merged.push(MergedCategory {
                name: &category.name,
                entries: entries.collect(),
            });
        }
    }
}

fn append_nodes<'d>(merged: &mut Vec<MergedNode<'d>>, nodes: &'d [CustomNode], origin: Origin) {
    merged.extend(
        nodes
            .iter()
            .enumerate()
            .map(|(position, entry)| MergedNode {
                origin,
                position,
                entry,
            }),
    );
}
