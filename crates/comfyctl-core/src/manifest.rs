use comfyctl_schema::{Category, EntryId};
use serde::{Deserialize, Serialize};

/// Flat, fully resolved output of the engine. Contains only concrete values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedManifest {
    /// Non-empty categories in merge order.
    pub categories: Vec<ResolvedCategory>,
    pub custom_nodes: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCategory {
    pub name: Category,
    pub entries: Vec<ResolvedModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModel {
    /// The urn, url, or id handed to the downloader.
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set when this entry was substituted for a `ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_ref: Option<EntryId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNode {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via_ref: Option<EntryId>,
}

/// The textual contract consumed by the installer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportedManifest {
    /// One comma-joined identifier list per non-empty category.
    pub categories: Vec<(Category, String)>,
    /// Space-joined custom node URLs; empty when there are none.
    pub custom_node_urls: String,
}

impl ResolvedManifest {
    pub fn category(&self, name: &str) -> Option<&ResolvedCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Identifiers of one category in order; empty if the category is absent.
    pub fn identifiers(&self, name: &str) -> Vec<&str> {
        self.category(name)
            .map(|c| c.entries.iter().map(|e| e.value.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn custom_node_urls(&self) -> Vec<&str> {
        self.custom_nodes.iter().map(|n| n.url.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.custom_nodes.is_empty()
    }

    pub fn export(&self) -> ExportedManifest {
        ExportedManifest {
            categories: self
                .categories
                .iter()
                .filter(|c| !c.entries.is_empty())
                .map(|c| {
                    let joined = c
                        .entries
                        .iter()
                        .map(|e| e.value.as_str())
                        .collect::<Vec<_>>()
                        .join(",");
                    (c.name.clone(), joined)
                })
                .collect(),
            custom_node_urls: self.custom_node_urls().join(" "),
        }
    }
}
