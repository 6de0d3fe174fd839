//! Sigmar CLI - Command-line interface
//!
//! Commands:
//! - generate: Fill a board and print its layout
//! - moves: List interactable cells and legal moves
//! - playout: Play random legal moves until the board is stuck or cleared

mod generate_cmd;
mod moves_cmd;
mod playout_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;
use tracing_subscriber::EnvFilter;

use generate_cmd::GenerateArgs;
use moves_cmd::MovesArgs;
use playout_cmd::PlayoutArgs;

#[derive(Parser)]
#[command(name = "sigmar")]
#[command(about = "Hex marble-matching board generator and move checker")]
struct Cli {
    /// Random seed for reproducibility (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board and print it
    Generate(GenerateArgs),
    /// List interactable cells and legal moves of a generated board
    Moves(MovesArgs),
    /// Play random legal moves on generated boards
    Playout(PlayoutArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::debug!("Using seed {}", seed);

    match cli.command {
        Commands::Generate(args) => generate_cmd::run(args, seed),
        Commands::Moves(args) => moves_cmd::run(args, seed),
        Commands::Playout(args) => playout_cmd::run(args, seed),
    }
}
