mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::resolve::Format;
use commands::{EXIT_CONFIG_UNREADABLE, EXIT_FAILURE};
use comfyctl_core::Engine;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "comfyctl",
    version,
    about = "Validate, resolve, and install ComfyUI configurations"
)]
struct Cli {
    /// Path to the YAML configuration document.
    #[arg(
        short,
        long,
        global = true,
        env = "COMFYCTL_CONFIG",
        default_value = "config.yml"
    )]
    config: PathBuf,

    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check the configuration and report every defect.
    Validate {
        /// Validate only the global lists plus this workflow.
        #[arg(short, long)]
        workflow: Option<String>,
        /// Treat warnings as failures.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Print the resolved install plan.
    Resolve {
        /// Workflow to overlay on the global lists.
        #[arg(short, long)]
        workflow: Option<String>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Shell)]
        format: Format,
    },
    /// Resolve the configuration and run the installer script with it.
    Install {
        /// Install dependencies for this workflow only.
        #[arg(short, long)]
        workflow: Option<String>,
        /// Path to a .env file forwarded to the installer.
        #[arg(long)]
        env_file: Option<PathBuf>,
        /// Installer script executed with bash.
        #[arg(long, default_value = "scripts/install_comfy_and_models.sh")]
        script: PathBuf,
        /// Parallel model downloads.
        #[arg(long, env = "CIVITAI_DOWNLOAD_THREADS")]
        download_threads: Option<u16>,
    },
    /// Launch ComfyUI from the configured comfy_dir.
    Start {
        /// Port ComfyUI listens on.
        #[arg(long, default_value_t = 8188)]
        port: u16,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    let default_level = if cli.trace {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("COMFYCTL_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let engine = Engine::new();
    let config = cli.config.as_path();
    let json_output = cli.json;

    let result = match cli.command {
        Commands::Validate { workflow, strict } => {
            commands::validate::run(&engine, config, workflow.as_deref(), strict, json_output)
        }
        Commands::Resolve { workflow, format } => {
            let format = if json_output { Format::Json } else { format };
            commands::resolve::run(&engine, config, workflow.as_deref(), format)
        }
        Commands::Install {
            workflow,
            env_file,
            script,
            download_threads,
        } => commands::install::run(
            &engine,
            config,
            &commands::install::InstallOptions {
                workflow: workflow.as_deref(),
                env_file: env_file.as_deref(),
                script: &script,
                download_threads,
            },
        ),
        Commands::Start { port } => commands::start::run(&engine, config, port),
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("failed to read configuration file") {
                EXIT_CONFIG_UNREADABLE
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
