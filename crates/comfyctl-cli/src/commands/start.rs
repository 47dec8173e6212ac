use super::{report_diagnostics, EXIT_FAILURE, EXIT_SUCCESS};
use comfyctl_core::Engine;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

pub const DEFAULT_COMFY_DIR: &str = "/workspace/ComfyUI";

pub fn run(engine: &Engine, config: &Path, port: u16) -> Result<u8, String> {
    let comfy_dir = comfy_dir(engine, config);
    let mut cmd = launch_command(&comfy_dir, port);
    info!("starting ComfyUI from {}", comfy_dir.display());

    let status = cmd
        .status()
        .map_err(|e| format!("failed to launch {}: {e}", cmd.get_program().to_string_lossy()))?;
    match status.code() {
        Some(0) => Ok(EXIT_SUCCESS),
        Some(code) => {
            eprintln!("error: ComfyUI exited with code {code}");
            Ok(u8::try_from(code).unwrap_or(EXIT_FAILURE))
        }
        None => Ok(EXIT_FAILURE),
    }
}

/// `install.comfy_dir` from the configuration, or the default when the
/// file is unreadable, invalid, or leaves it unset.
fn comfy_dir(engine: &Engine, config: &Path) -> PathBuf {
    let configured = match engine.resolve_file(config, None) {
        Ok(resolution) => {
            if !resolution.is_success() {
                report_diagnostics(&resolution.diagnostics);
                warn!("configuration is invalid; using default comfy_dir");
            }
            resolution.plan.and_then(|plan| plan.install.comfy_dir)
        }
        Err(e) => {
            warn!("{e}; using default comfy_dir");
            None
        }
    };
    PathBuf::from(configured.unwrap_or_else(|| DEFAULT_COMFY_DIR.to_owned()))
}

fn launch_command(comfy_dir: &Path, port: u16) -> Command {
    let mut cmd = Command::new(comfy_dir.join("venv").join("bin").join("python"));
    cmd.arg(comfy_dir.join("main.py"))
        .arg("--listen")
        .arg("--port")
        .arg(port.to_string());
    cmd
}
