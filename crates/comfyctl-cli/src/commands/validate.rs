use super::{format_diagnostic, json_pretty, EXIT_FAILURE, EXIT_SUCCESS};
use comfyctl_core::{Engine, Resolution};
use comfyctl_schema::Diagnostic;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    short_id: Option<String>,
    diagnostics: &'a [Diagnostic],
}

pub fn run(
    engine: &Engine,
    config: &Path,
    workflow: Option<&str>,
    strict: bool,
    json: bool,
) -> Result<u8, String> {
    let resolution = match workflow {
        Some(_) => engine.resolve_file(config, workflow),
        None => engine.check_file(config),
    }
    .map_err(|e| format!("{e} ({})", config.display()))?;

    let valid = is_valid(&resolution, strict);
    let short_id = match &resolution.plan {
        Some(plan) => Some(plan.digest().map_err(|e| e.to_string())?.short_id.into_inner()),
        None => None,
    };

    if json {
        let report = ValidationReport {
            valid,
            workflow,
            short_id,
            diagnostics: &resolution.diagnostics,
        };
        println!("{}", json_pretty(&report)?);
    } else {
        let fatal = resolution.fatal().count();
        let warnings = resolution.warnings().count();
        if fatal > 0 {
            println!("[!] Configuration validation failed:");
        } else if warnings > 0 {
            println!("[!] Configuration has warnings:");
        }
        for diagnostic in &resolution.diagnostics {
            println!("  - {}", format_diagnostic(diagnostic));
        }
        if valid {
            let id = short_id.as_deref().unwrap_or("-");
            println!("[✓] {} passed validation (plan {id})", config.display());
        } else if fatal == 0 {
            println!("[!] {warnings} warning(s) treated as errors (--strict)");
        }
    }

    Ok(if valid { EXIT_SUCCESS } else { EXIT_FAILURE })
}

fn is_valid(resolution: &Resolution, strict: bool) -> bool {
    if strict {
        resolution.diagnostics.is_empty()
    } else {
        resolution.is_success()
    }
}
