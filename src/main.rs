//! RideMetrics - command line front end.
//!
//! Reads an activity's streams as JSON and prints the analysis report.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ridemetrics::config::load_config;
use ridemetrics::metrics::Gender;
use ridemetrics::{analyze, ActivityStreams};

#[derive(Parser, Debug)]
#[command(name = "ridemetrics", version, about = "Derive power and pace metrics from activity streams")]
struct Args {
    /// JSON file with `time` and optional `watts`, `distance`, `altitude`,
    /// `heartrate` and `cadence` arrays
    streams: PathBuf,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(short, long, env = "RIDEMETRICS_CONFIG")]
    config: Option<PathBuf>,

    /// Functional Threshold Power in watts
    #[arg(long)]
    ftp: Option<f64>,

    /// Athlete weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Athlete gender for power profile ranking (male or female)
    #[arg(long)]
    gender: Option<Gender>,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    tracing::info!("Starting RideMetrics v{}", env!("CARGO_PKG_VERSION"));

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(ftp) = args.ftp {
        config.athlete.ftp = Some(ftp);
    }
    if let Some(weight) = args.weight {
        config.athlete.weight_kg = Some(weight);
    }
    if let Some(gender) = args.gender {
        config.athlete.gender = gender;
    }

    let json = std::fs::read_to_string(&args.streams)
        .with_context(|| format!("reading {}", args.streams.display()))?;
    let streams = ActivityStreams::from_json_str(&json)
        .with_context(|| format!("parsing {}", args.streams.display()))?;

    let report = analyze(&streams, &config).context("analyzing activity")?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{output}");

    Ok(())
}
