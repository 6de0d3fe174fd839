//! Sigmar Core - board and move legality for a hex tile-matching puzzle
//!
//! This crate provides:
//! - Marble catalog (salt, elements, ordered metals, quicksilver, life)
//! - Hex board with boundary sentinels and a frozen adjacency graph
//! - Free-status engine (three-wide empty arc rule)
//! - Wavefront generator that fills a board so it stays clearable
//! - Match rules with the sequential metal unlock pointer

pub mod board;
pub mod error;
pub mod free;
pub mod game;
pub mod generator;
pub mod marble;
pub mod rules;
pub mod select;

// Re-exports for convenient access
pub use board::{Board, BoardBuilder, Cell, CellId, Coord, Direction, Layout, SMALL_ROW_WIDTHS};
pub use error::{Result, SigmarError};
pub use game::{Game, GameConfig, Move};
pub use generator::{generate, GeneratorConfig};
pub use marble::{symbol_of, Element, Life, Marble, Metal, EMPTY_SYMBOL};
pub use rules::MatchState;
