mod config;
mod logging;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use envsnap::{CollectionOutcome, EnvironmentCollector, NativeHost};

use crate::config::{AppConfig, CliOverrides, OutputConfig};

/// envsnap - best-effort device environment snapshot
#[derive(Parser)]
#[command(name = "envsnap")]
#[command(about = "envsnap - collects a best-effort environment snapshot as JSON")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Pretty-print the snapshot
    #[arg(long)]
    pretty: bool,

    /// Write the snapshot to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect one snapshot (default)
    Collect,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config
        && !Path::new(path).is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (ENVSNAP__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&CliOverrides {
        verbose: cli.verbose,
        pretty: cli.pretty,
        output: cli.output.clone(),
    });

    logging::init_logging(&config.logging)?;

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Collect) {
        Commands::Collect => collect(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn collect(config: AppConfig) -> Result<()> {
    let collector = EnvironmentCollector::with_config(NativeHost::new(), config.collector);
    tracing::debug!(family = ?collector.host().family(), "Collecting from native host");

    let outcome = collector.collect().await;
    write_outcome(&outcome, &config.output)?;

    if let CollectionOutcome::Failed(failed) = &outcome {
        anyhow::bail!("collection failed: {}", failed.error);
    }
    Ok(())
}

fn write_outcome(outcome: &CollectionOutcome, output: &OutputConfig) -> Result<()> {
    let json = if output.pretty {
        serde_json::to_string_pretty(outcome)?
    } else {
        serde_json::to_string(outcome)?
    };

    match &output.path {
        Some(path) => {
            std::fs::write(path, json + "\n")?;
            tracing::info!(path = %path.display(), "Snapshot written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
