//! Free-status engine
//!
//! A cell is free (interactable) when it is a boundary sentinel, or when its
//! six neighbours, read in cyclic order, contain three consecutive empty
//! cells. The flag is cached on the cell and only depends on distance-1
//! neighbours, so an occupancy change needs at most one hop of recomputation.

use crate::board::{Board, CellId};

/// Consecutive empty neighbours needed to free a cell
pub const ARC_LEN: usize = 3;

/// Whether `id` has an empty arc of [`ARC_LEN`] neighbours. A missing
/// neighbour slot counts as empty.
pub fn has_open_arc(board: &Board, id: CellId) -> bool {
    let empty = board[id]
        .neighbor_slots()
        .map(|slot| slot.map_or(true, |n| board[n].is_empty()));
    (0..empty.len()).any(|start| (0..ARC_LEN).all(|k| empty[(start + k) % empty.len()]))
}

/// Uncached free predicate
pub fn is_free(board: &Board, id: CellId) -> bool {
    board[id].is_boundary() || has_open_arc(board, id)
}

/// Recompute and cache the free flag of `id`. With `cascade` the six
/// neighbours are refreshed as well, without cascading further.
pub fn recompute(board: &mut Board, id: CellId, cascade: bool) -> bool {
    if cascade {
        for neighbor in board[id].neighbor_slots().into_iter().flatten() {
            recompute(board, neighbor, false);
        }
    }
    let free = is_free(board, id);
    board.cells[id.index()].free = free;
    free
}
