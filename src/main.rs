use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::info;

use crystnet::cif::CifRecord;
use crystnet::crystal::ClusteringMode;
use crystnet::pipeline::net_from_cif;
use crystnet::warnings::set_warnings_enabled;

#[derive(Parser)]
#[command(name = "crystnet")]
#[command(about = "Compute the canonical topological net of a crystal structure")]
#[command(version)]
struct Cli {
    /// Parsed crystal record (JSON)
    input: PathBuf,

    /// How atoms are grouped into net vertices
    #[arg(short, long, value_enum, default_value_t = Clustering::Auto)]
    clustering: Clustering,

    /// Emit the net as JSON instead of a readable listing
    #[arg(long)]
    json: bool,

    /// Silence pipeline warnings
    #[arg(short, long)]
    quiet: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Clustering {
    Input,
    EachVertex,
    Mof,
    Guess,
    Auto,
}

impl From<Clustering> for ClusteringMode {
    fn from(mode: Clustering) -> Self {
        match mode {
            Clustering::Input => ClusteringMode::Input,
            Clustering::EachVertex => ClusteringMode::EachVertex,
            Clustering::Mof => ClusteringMode::Mof,
            Clustering::Guess => ClusteringMode::Guess,
            Clustering::Auto => ClusteringMode::Auto,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();
    set_warnings_enabled(!cli.quiet);

    info!("Starting crystnet v{}", crystnet::VERSION);

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("could not read {}", cli.input.display()))?;
    let record: CifRecord = serde_json::from_str(&raw)
        .with_context(|| format!("could not parse {} as a crystal record", cli.input.display()))?;

    info!(
        "Loaded {} atom site(s), {} equivalent position(s)",
        record.natoms(),
        record.cell.equivalents.len()
    );

    let net = net_from_cif(&record, cli.clustering.into())?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&net)?);
    } else {
        print!("{net}");
    }
    Ok(())
}
