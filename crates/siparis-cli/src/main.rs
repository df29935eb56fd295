mod bosch;
mod transform;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "siparis")]
#[command(about = "Order workbook transformation and BOSCH reconciliation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Transform the primary stock workbook, optionally merging inbound
    /// deliveries and brand balance files into it.
    Transform(transform::TransformArgs),
    /// Join the three BOSCH export files into a depot-filtered order list.
    Bosch(bosch::BoschArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = siparis_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Transform(args) => transform::run(args, &config).await,
        Commands::Bosch(args) => bosch::run(&args),
    }
}
