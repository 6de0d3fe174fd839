//! Moves command - list interactable cells and legal moves of a board

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use sigmar_core::{Board, CellId, Game, GameConfig, Layout, Move};

#[derive(Args)]
pub struct MovesArgs {
    /// Board layout
    #[arg(long, default_value = "small")]
    pub layout: Layout,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonCell {
    row: u8,
    offset: u8,
    marble: &'static str,
}

#[derive(Serialize)]
struct JsonOutput {
    seed: u64,
    next_metal: Option<String>,
    eligible: Vec<JsonCell>,
    moves: Vec<Vec<JsonCell>>,
}

pub fn run(args: MovesArgs, seed: u64) -> Result<()> {
    let config = GameConfig::default().with_layout(args.layout).with_seed(seed);
    let game = Game::from_config(&config)
        .with_context(|| format!("Failed to generate board with seed {seed}"))?;

    let eligible = game.eligible_cells();
    let moves = game.legal_moves();
    tracing::info!("Seed {}: {} eligible cells, {} legal moves", seed, eligible.len(), moves.len());

    if args.json {
        let board = game.board();
        let output = JsonOutput {
            seed,
            next_metal: game.state().next_metal().map(|m| format!("{m:?}").to_lowercase()),
            eligible: eligible.iter().map(|&id| json_cell(board, id)).collect(),
            moves: moves
                .iter()
                .map(|&mv| move_cells(mv).into_iter().map(|id| json_cell(board, id)).collect())
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("seed: {seed}");
        println!("eligible cells:");
        for &id in &eligible {
            println!("  {}", describe_cell(game.board(), id));
        }
        println!("legal moves:");
        for &mv in &moves {
            println!("  {}", describe_move(game.board(), mv));
        }
    }
    Ok(())
}

/// Cells touched by a move, in order
pub fn move_cells(mv: Move) -> Vec<CellId> {
    match mv {
        Move::Pair(a, b) => vec![a, b],
        Move::Single(c) => vec![c],
    }
}

pub fn describe_cell(board: &Board, id: CellId) -> String {
    let cell = &board[id];
    match cell.marble() {
        Some(marble) => format!("{} {}", cell.coord(), marble),
        None => format!("{} empty", cell.coord()),
    }
}

pub fn describe_move(board: &Board, mv: Move) -> String {
    move_cells(mv)
        .into_iter()
        .map(|id| describe_cell(board, id))
        .collect::<Vec<_>>()
        .join(" + ")
}

fn json_cell(board: &Board, id: CellId) -> JsonCell {
    let cell = &board[id];
    JsonCell {
        row: cell.coord().row,
        offset: cell.coord().offset,
        marble: cell.marble().map_or("empty", |m| m.name()),
    }
}
