//! # Conduit CLI
//!
//! Entry point for the connector integrator and the motion generator.
//!
//! ## Commands
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  conduit [--log-level LEVEL] <COMMAND>                                 │
//! │                                                                         │
//! │  integrate [--config PATH] [--no-demo]                                 │
//! │      probe → (demo tasks) → process queue → JSON report on stdout      │
//! │                                                                         │
//! │  motion --type TYPE [--config PATH] [--templates DIR] [--output DIR]   │
//! │         [--compile]                                                    │
//! │      fill template → save .tex → (compile to .pdf)                     │
//! │                                                                         │
//! │  config init [--path PATH] [--force] | config show [--path PATH]       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Logs go to stderr so the report on stdout stays machine-readable.

mod integrate;
mod motion;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use conduit_sync::IntegratorConfig;

#[derive(Parser)]
#[command(name = "conduit")]
#[command(about = "Connector integrator and motion document generator")]
#[command(version)]
struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "conduit_sync=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every platform, process the sync queue and print a report
    Integrate {
        /// Integrator config file (defaults to the user config directory)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Skip enqueuing the two demonstration tasks
        #[arg(long)]
        no_demo: bool,
    },

    /// Generate a motion document from the template
    Motion {
        /// Motion type: compel, sanctions, modify or emergency
        #[arg(long = "type")]
        motion_type: String,

        /// JSON file with motion parameters
        #[arg(long, default_value = "config/motion_config.json")]
        config: PathBuf,

        /// Directory holding <template>.tex files
        #[arg(long, default_value = conduit_docs::generator::DEFAULT_TEMPLATES_DIR)]
        templates: PathBuf,

        /// Directory the generated documents are written to
        #[arg(long, default_value = conduit_docs::generator::DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Compile the generated document to PDF
        #[arg(long)]
        compile: bool,
    },

    /// Manage the integrator config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (file + environment)
    Show {
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Integrate { config, no_demo } => integrate::run(config, !no_demo).await,
        Commands::Motion {
            motion_type,
            config,
            templates,
            output,
            compile,
        } => {
            motion::run(motion::MotionArgs {
                motion_type,
                config,
                templates,
                output,
                compile,
            })
            .await
        }
        Commands::Config { action } => match action {
            ConfigAction::Init { path, force } => config_init(path, force),
            ConfigAction::Show { path } => config_show(path),
        },
    }
}

fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level: {}", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn config_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path
        .or_else(IntegratorConfig::default_config_path)
        .context("No config directory available; pass --path")?;

    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    IntegratorConfig::default()
        .save(Some(path.clone()))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config written: {}", path.display());
    Ok(())
}

fn config_show(path: Option<PathBuf>) -> Result<()> {
    let config = IntegratorConfig::load(path).context("Failed to load integrator config")?;

    println!("probe.timeout_ms        = {}", config.probe.timeout_ms);
    println!("sync.simulated_delay_ms = {}", config.sync.simulated_delay_ms);
    println!("sync.strict_platforms   = {}", config.sync.strict_platforms);
    for platform in config.credentials.keys() {
        println!("credentials.{:<12}= <set>", platform);
    }
    Ok(())
}
