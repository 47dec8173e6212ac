use super::{load_resolution, report_diagnostics, EXIT_FAILURE, EXIT_SUCCESS};
use comfyctl_core::{Engine, InstallPlan};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub struct InstallOptions<'a> {
    pub workflow: Option<&'a str>,
    pub env_file: Option<&'a Path>,
    pub script: &'a Path,
    pub download_threads: Option<u16>,
}

pub fn run(engine: &Engine, config: &Path, options: &InstallOptions<'_>) -> Result<u8, String> {
    let resolution = load_resolution(engine, config, options.workflow)?;
    report_diagnostics(&resolution.diagnostics);
    let Some(plan) = resolution.plan else {
        eprintln!("error: configuration has fatal errors; refusing to install");
        return Ok(EXIT_FAILURE);
    };

    if !options.script.is_file() {
        return Err(format!(
            "installer script not found: {}",
            options.script.display()
        ));
    }

    let mut cmd = installer_command(&plan, config, options)?;
    info!("running installer {}", options.script.display());
    let status = cmd
        .status()
        .map_err(|e| format!("failed to launch bash: {e}"))?;
    debug!("installer exited with {status}");

    match status.code() {
        Some(0) => Ok(EXIT_SUCCESS),
        Some(code) => {
            eprintln!("error: installation failed with exit code {code}");
            Ok(u8::try_from(code).unwrap_or(EXIT_FAILURE))
        }
        None => {
            eprintln!("error: installer terminated by signal");
            Ok(EXIT_FAILURE)
        }
    }
}

fn installer_command(
    plan: &InstallPlan,
    config: &Path,
    options: &InstallOptions<'_>,
) -> Result<Command, String> {
    let mut cmd = Command::new("bash");
    cmd.arg(options.script);
    cmd.envs(plan.environment());
    cmd.env("CONFIG_FILE", absolute(config)?);
    if let Some(workflow) = options.workflow {
        cmd.env("WORKFLOW", workflow);
    }
    if let Some(env_file) = options.env_file {
        cmd.env("ENV_FILE", absolute(env_file)?);
    }
    if let Some(threads) = options.download_threads {
        cmd.env("CIVITAI_DOWNLOAD_THREADS", threads.to_string());
    }
    Ok(cmd)
}

fn absolute(path: &Path) -> Result<PathBuf, String> {
    path.canonicalize()
        .map_err(|e| format!("failed to resolve {}: {e}", path.display()))
}
