//! The resolved install plan and its serializations.
//!
//! `environment()` is the contract with the external installer; the other
//! renderings are derived from it or from the plan's serde form.

use crate::manifest::ResolvedManifest;
use comfyctl_schema::InstallSettings;
use serde::Serialize;
use shell_escape::escape;
use std::borrow::Cow;
use thiserror::Error;

pub const COMFY_DIR_VAR: &str = "COMFY_DIR";
pub const CPU_ONLY_VAR: &str = "CPU_ONLY";
pub const MODEL_DEST_DIR_VAR: &str = "MODEL_DEST_DIR";
pub const MODELS_SOURCE_DIR_VAR: &str = "MODELS_SOURCE_DIR";
pub const CUSTOM_NODE_URLS_VAR: &str = "YAML_CUSTOM_NODE_URLS";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML serialization failed: {0}")]
    Toml(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub install: InstallSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    /// Name of the overlaid workflow; `None` for a global-only plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    pub manifest: ResolvedManifest,
}

impl InstallPlan {
    /// Ordered `(NAME, value)` pairs handed to the installer.
    pub fn environment(&self) -> Vec<(String, String)> {
        let mut env = Vec::new();
        if let Some(dir) = &self.install.comfy_dir {
            env.push((COMFY_DIR_VAR.to_owned(), dir.clone()));
        }
        let cpu_only = if self.install.cpu_only { "1" } else { "0" };
        env.push((CPU_ONLY_VAR.to_owned(), cpu_only.to_owned()));
        if let Some(dir) = &self.dest_dir {
            env.push((MODEL_DEST_DIR_VAR.to_owned(), dir.clone()));
        }
        if let Some(dir) = &self.source_dir {
            env.push((MODELS_SOURCE_DIR_VAR.to_owned(), dir.clone()));
        }

        let exported = self.manifest.export();
        for (category, joined) in exported.categories {
            env.push((category.env_var(), joined));
        }
        env.push((CUSTOM_NODE_URLS_VAR.to_owned(), exported.custom_node_urls));
        env
    }

    /// `NAME=value` lines with shell-quoted values, one per variable.
    pub fn to_shell(&self) -> String {
        self.environment()
            .into_iter()
            .map(|(name, value)| {
                let quoted = escape(Cow::Borrowed(value.as_str()));
                format!("{name}={quoted}\n")
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_toml(&self) -> Result<String, ExportError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Compact JSON used as the digest input.
    pub fn canonical_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string(self)?)
    }
}
