//! Playout command - random legal moves until the board is stuck or cleared
//!
//! This is a baseline for how often random play clears a generated board,
//! not a solver.

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use sigmar_core::{Game, GameConfig, Layout, SigmarError};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayoutArgs {
    /// Board layout
    #[arg(long, default_value = "small")]
    pub layout: Layout,

    /// Number of boards to play (seeds increase by one per board)
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum moves per board
    #[arg(long, default_value = "100")]
    pub max_moves: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one random playout
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlayoutRecord {
    pub seed: u64,
    pub moves: usize,
    pub removed: usize,
    pub left: usize,
    pub cleared: bool,
}

/// Aggregated playout results
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlayoutSummary {
    pub games: usize,
    pub cleared: usize,
    pub avg_removed: f32,
    pub records: Vec<PlayoutRecord>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayoutArgs, base_seed: u64) -> Result<()> {
    let config = GameConfig::default().with_layout(args.layout);

    tracing::info!("Starting {} playouts from seed {}", args.games, base_seed);

    let mut records = Vec::with_capacity(args.games);
    for i in 0..args.games {
        let seed = base_seed.wrapping_add(i as u64);
        let record = play_one(&config, seed, args.max_moves)?;
        tracing::info!(
            "Board {}: removed {}, left {}{}",
            seed,
            record.removed,
            record.left,
            if record.cleared { " (cleared)" } else { "" }
        );
        records.push(record);
    }

    let summary = summarize(records);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_text(&summary);
    }
    Ok(())
}

// ============================================================================
// STEPS
// ============================================================================

/// Generate a board from `seed` and play random moves on it. One ChaCha8
/// stream drives generation and move choice.
pub fn play_one(config: &GameConfig, seed: u64, max_moves: usize) -> Result<PlayoutRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut game = Game::new(config, &mut rng)
        .with_context(|| format!("Failed to generate board with seed {seed}"))?;

    let mut moves = 0;
    while moves < max_moves {
        let mv = match game.random_move(&mut rng) {
            Ok(mv) => mv,
            Err(SigmarError::EmptyCollection(_)) => break,
            Err(e) => return Err(e.into()),
        };
        game.apply(mv)?;
        moves += 1;
    }

    Ok(PlayoutRecord {
        seed,
        moves,
        removed: game.removed(),
        left: game.marbles_left(),
        cleared: game.is_cleared(),
    })
}

pub fn summarize(records: Vec<PlayoutRecord>) -> PlayoutSummary {
    let games = records.len();
    let cleared = records.iter().filter(|r| r.cleared).count();
    let avg_removed = if games > 0 {
        records.iter().map(|r| r.removed).sum::<usize>() as f32 / games as f32
    } else {
        0.0
    };
    PlayoutSummary {
        games,
        cleared,
        avg_removed,
        records,
    }
}

fn print_text(summary: &PlayoutSummary) {
    println!("\n=== Playout Results ===");
    println!("Boards:       {}", summary.games);
    println!("Cleared:      {}", summary.cleared);
    println!("Avg removed:  {:.1}", summary.avg_removed);
    for r in &summary.records {
        println!(
            "  seed {}: {} moves, {} removed, {} left",
            r.seed, r.moves, r.removed, r.left
        );
    }
}
