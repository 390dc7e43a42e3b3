use std::path::PathBuf;

use alpha_miner::{discover_alpha_net, AlphaMinerConfig, EventLog, Exportable, Importable};
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Discover a Petri net from an event log using the Alpha algorithm
#[derive(Debug, Parser)]
#[command(name = "alpha-miner", version)]
struct Cli {
    /// Event log to mine (.csv, .csv.gz or .json)
    #[arg(short, long)]
    log: PathBuf,

    /// Output path of the discovered Petri net (.pnml or .json; .dot/.svg/.png with graphviz-export)
    #[arg(short, long)]
    output: PathBuf,

    /// JSON file with Alpha parameters; defaults are used for missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the per-stage durations as JSON to this path
    #[arg(long)]
    durations: Option<PathBuf>,

    /// Print the maximal place candidates
    #[arg(long)]
    print_places: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose {
        "alpha_miner=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AlphaMinerConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read config {}", path.display()))?;
            AlphaMinerConfig::from_json(&json)
                .with_context(|| format!("Invalid config {}", path.display()))
        }
        None => Ok(AlphaMinerConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    tracing::debug!(?cli, "Parsed arguments");

    let config = load_config(cli.config.as_ref())?;
    let log = EventLog::import_from_path(&cli.log)
        .with_context(|| format!("Could not import event log {}", cli.log.display()))?;
    tracing::info!(
        traces = log.len(),
        path = %cli.log.display(),
        "Imported event log"
    );

    let (discovery, durations) = discover_alpha_net(&log, &config)?;
    if cli.print_places {
        for (cnd, place) in discovery.net.candidate_places() {
            let label = discovery
                .net
                .net()
                .places
                .get(&place.get_uuid())
                .and_then(|p| p.label.clone())
                .unwrap_or_default();
            println!("{label}: {cnd}");
        }
    }
    if let Some(path) = &cli.durations {
        std::fs::write(path, durations.to_json()?)
            .with_context(|| format!("Could not write durations to {}", path.display()))?;
    }

    discovery
        .net
        .net()
        .export_to_path(&cli.output)
        .with_context(|| format!("Could not export Petri net to {}", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), "Exported Petri net");
    Ok(())
}
