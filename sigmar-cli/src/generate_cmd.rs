//! Generate command - fill a board and print its occupancy

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sigmar_core::{symbol_of, Board, Cell, Game, GameConfig, Layout};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct GenerateArgs {
    /// Board layout
    #[arg(long, default_value = "small")]
    pub layout: Layout,

    /// Output the board as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonMarble {
    row: u8,
    offset: u8,
    marble: &'static str,
}

#[derive(Serialize)]
struct JsonBoard {
    seed: u64,
    layout: &'static str,
    marbles: Vec<JsonMarble>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: GenerateArgs, seed: u64) -> Result<()> {
    let config = GameConfig::default().with_layout(args.layout).with_seed(seed);

    tracing::info!("Generating {} board with seed {}", args.layout, seed);
    let game = Game::from_config(&config)
        .with_context(|| format!("Failed to generate board with seed {seed}"))?;

    if args.json {
        print_json(game.board(), args.layout, seed)?;
    } else {
        println!("seed: {seed}");
        for line in board_lines(game.board()) {
            println!("{line}");
        }
    }
    Ok(())
}

// ============================================================================
// FORMATTING
// ============================================================================

/// One line per playable row, indented so the hex shape shows
pub fn board_lines(board: &Board) -> Vec<String> {
    let playable: Vec<Vec<&Cell>> = board
        .rows()
        .map(|row| row.iter().filter(|c| !c.is_boundary()).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    let widest = playable.iter().map(Vec::len).max().unwrap_or(0);

    playable
        .iter()
        .map(|row| {
            let symbols: Vec<String> = row.iter().map(|c| symbol_of(c.marble()).to_string()).collect();
            format!("{}{}", "  ".repeat(widest - row.len()), symbols.join(" - "))
        })
        .collect()
}

fn print_json(board: &Board, layout: Layout, seed: u64) -> Result<()> {
    let output = JsonBoard {
        seed,
        layout: layout.name(),
        marbles: board
            .occupancy()
            .into_iter()
            .map(|(coord, marble)| JsonMarble {
                row: coord.row,
                offset: coord.offset,
                marble: marble.name(),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
