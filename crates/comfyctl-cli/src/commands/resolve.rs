use super::{load_resolution, report_diagnostics, EXIT_FAILURE, EXIT_SUCCESS};
use clap::ValueEnum;
use comfyctl_core::{Engine, InstallPlan};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `NAME=value` lines for `eval` in a shell.
    Shell,
    Json,
    Toml,
}

pub fn run(
    engine: &Engine,
    config: &Path,
    workflow: Option<&str>,
    format: Format,
) -> Result<u8, String> {
    let resolution = load_resolution(engine, config, workflow)?;
    report_diagnostics(&resolution.diagnostics);

    let Some(plan) = resolution.plan else {
        eprintln!("error: configuration has fatal errors; no plan produced");
        return Ok(EXIT_FAILURE);
    };
    print!("{}", render(&plan, format)?);
    Ok(EXIT_SUCCESS)
}

pub fn render(plan: &InstallPlan, format: Format) -> Result<String, String> {
    match format {
        Format::Shell => {
            let digest = plan.digest().map_err(|e| e.to_string())?;
            Ok(format!("# comfyctl plan {}\n{}", digest.short_id, plan.to_shell()))
        }
        Format::Json => plan
            .to_json()
            .map(|json| format!("{json}\n"))
            .map_err(|e| e.to_string()),
        Format::Toml => plan.to_toml().map_err(|e| e.to_string()),
    }
}
