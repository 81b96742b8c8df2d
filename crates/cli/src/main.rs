use clap::{Parser, Subcommand};
use pairarb_core::{AppConfig, ConfigLoader, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

mod commands;
mod output;
mod quotes;

use commands::{DemoArgs, EvaluateArgs};

#[derive(Parser)]
#[command(name = "pairarb")]
#[command(about = "Cross-market binary arbitrage finder and position sizer", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "PAIRARB_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Config profile layered over the base file (loads Config.{profile}.toml)
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in BTC > $100k Kalshi/Polymarket example
    Demo(DemoArgs),
    /// Evaluate a quote pair from a TOML file
    Evaluate(EvaluateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_from(&cli.config, cli.profile.as_deref())?;
    init_logging(&config);

    match cli.command {
        Commands::Demo(args) => {
            commands::run_demo(args, config.arbitrage)?;
        }
        Commands::Evaluate(args) => {
            commands::run_evaluate(args, config.arbitrage)?;
        }
    }

    Ok(())
}

fn init_logging(config: &AppConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
