//! Wavefront board generation
//!
//! The first marble goes on the centre cell. Every following marble is put
//! next to an already placed cell (the frontier), on a cell that is empty,
//! playable and free at that moment. Removing marbles in reverse placement
//! order is therefore always possible, which keeps the board reachable.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, CellId};
use crate::error::{Result, SigmarError};
use crate::marble::Marble;

/// What to lay down: one marble on the centre, then pairs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub first_marble: Marble,
    pub pairs: Vec<(Marble, Marble)>,
}

impl Default for GeneratorConfig {
    /// Marble set of the small layout
    fn default() -> Self {
        Self {
            first_marble: Marble::GOLD,
            pairs: vec![
                (Marble::Quicksilver, Marble::SILVER),
                (Marble::Quicksilver, Marble::COPPER),
                (Marble::EARTH, Marble::EARTH),
                (Marble::FIRE, Marble::FIRE),
                (Marble::WIND, Marble::WIND),
                (Marble::WATER, Marble::WATER),
                (Marble::MORS, Marble::VITAE),
                (Marble::Salt, Marble::Salt),
            ],
        }
    }
}

impl GeneratorConfig {
    pub fn with_first_marble(mut self, marble: Marble) -> Self {
        self.first_marble = marble;
        self
    }

    pub fn with_pairs(mut self, pairs: Vec<(Marble, Marble)>) -> Self {
        self.pairs = pairs;
        self
    }

    pub fn total_marbles(&self) -> usize {
        1 + self.pairs.len() * 2
    }

    /// Every marble to place, first marble included
    pub fn marbles(&self) -> Vec<Marble> {
        std::iter::once(self.first_marble)
            .chain(self.pairs.iter().flat_map(|&(a, b)| [a, b]))
            .collect()
    }
}

/// Clear `board` and fill it from `config`. Returns the cells in placement
/// order. On failure the board is left empty.
pub fn generate<R: Rng + ?Sized>(
    board: &mut Board,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<CellId>> {
    board.clear();
    let total = config.total_marbles();
    let center = board.center();
    board.set_marble(center, Some(config.first_marble))?;

    let mut placements = Vec::with_capacity(total);
    placements.push(center);
    let mut frontier = vec![center];

    let mut pairs = config.pairs.clone();
    pairs.shuffle(rng);

    for (a, b) in pairs {
        for marble in [a, b] {
            match grow(board, &mut frontier, marble, rng)? {
                Some(cell) => placements.push(cell),
                None => {
                    let placed = placements.len();
                    tracing::warn!(
                        "Wavefront exhausted placing {} ({} of {} placed, frontier {})",
                        marble,
                        placed,
                        total,
                        frontier.len()
                    );
                    board.clear();
                    return Err(SigmarError::GenerationFailure { marble, placed, total });
                }
            }
        }
        tracing::debug!("Placed pair {}/{}, frontier size {}", a, b, frontier.len());
    }

    tracing::debug!("Generated board with {} marbles", placements.len());
    Ok(placements)
}

/// Place `marble` next to some frontier cell. `None` when no frontier cell
/// has a usable neighbour.
fn grow<R: Rng + ?Sized>(
    board: &mut Board,
    frontier: &mut Vec<CellId>,
    marble: Marble,
    rng: &mut R,
) -> Result<Option<CellId>> {
    frontier.shuffle(rng);
    for i in 0..frontier.len() {
        let source = frontier[i];
        let mut around = board[source].neighbor_slots();
        around.shuffle(rng);

        let target = around.into_iter().flatten().find(|&n| {
            let cell = &board[n];
            cell.is_empty() && !cell.is_boundary() && cell.is_free()
        });

        if let Some(target) = target {
            board.set_marble(target, Some(marble))?;
            frontier.push(target);
            if board.is_enclosed(source) {
                frontier.remove(i);
            }
            return Ok(Some(target));
        }
    }
    Ok(None)
}
