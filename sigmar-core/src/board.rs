//! Hex board geometry: cells in rows of varying width, wired once into a
//! six-direction adjacency graph.
//!
//! Cells live in a row-major arena and refer to each other by [`CellId`].
//! The outermost row and the first and last cell of every interior row are
//! boundary sentinels: they never hold a marble and always report free.

use std::ops::{Index, Range};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SigmarError};
use crate::free;
use crate::marble::Marble;

/// Row widths of the small layout, boundary ring included
pub const SMALL_ROW_WIDTHS: [usize; 7] = [6, 7, 8, 9, 8, 7, 6];

/// Position of a cell: row index and index within that row
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub offset: u8,
}

impl Coord {
    pub const fn new(row: u8, offset: u8) -> Self {
        Self { row, offset }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.offset)
    }
}

/// Neighbour directions in fixed cyclic order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    UpLeft,
    UpRight,
    Right,
    DownRight,
    DownLeft,
    Left,
}

impl Direction {
    /// Clockwise, starting from the upper left
    pub const ALL: [Direction; 6] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::DownLeft,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self.index() + 3) % 6]
    }
}

/// Stable index of a cell in its board
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One grid position
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) coord: Coord,
    pub(crate) marble: Option<Marble>,
    pub(crate) neighbors: [Option<CellId>; 6],
    pub(crate) boundary: bool,
    pub(crate) free: bool,
}

impl Cell {
    fn new(coord: Coord, boundary: bool) -> Self {
        Self {
            coord,
            marble: None,
            neighbors: [None; 6],
            boundary,
            free: false,
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn marble(&self) -> Option<Marble> {
        self.marble
    }

    pub fn is_empty(&self) -> bool {
        self.marble.is_none()
    }

    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Cached interactable flag
    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Neighbour slots in cyclic order
    pub fn neighbor_slots(&self) -> [Option<CellId>; 6] {
        self.neighbors
    }

    /// Wired neighbours in cyclic order
    pub fn neighbors(&self) -> impl Iterator<Item = CellId> + '_ {
        self.neighbors.iter().flatten().copied()
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Board variants. Only the small layout is defined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    Small,
}

impl Layout {
    pub const ALL: [Layout; 1] = [Layout::Small];

    pub fn row_widths(self) -> &'static [usize] {
        match self {
            Layout::Small => &SMALL_ROW_WIDTHS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Small => "small",
        }
    }

    pub fn from_name(name: &str) -> Result<Layout> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.name() == name)
            .ok_or_else(|| SigmarError::Configuration(format!("unknown layout {name:?}, use \"small\"")))
    }

    pub fn from_row_widths(widths: &[usize]) -> Result<Layout> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.row_widths() == widths)
            .ok_or_else(|| SigmarError::Configuration(format!("no layout has row widths {widths:?}")))
    }
}

impl FromStr for Layout {
    type Err = SigmarError;

    fn from_str(s: &str) -> Result<Self> {
        Layout::from_name(s)
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Assembles cells and their adjacency before the topology is frozen into a
/// [`Board`]. Used by [`Board::new`] and for hand-wired test boards.
#[derive(Clone, Debug, Default)]
pub struct BoardBuilder {
    cells: Vec<Cell>,
    rows: Vec<Range<usize>>,
    center: Option<CellId>,
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder for a hex layout with every playable cell wired
    pub fn from_layout(layout: Layout) -> Self {
        let widths = layout.row_widths();
        let mut builder = Self::new();
        let last_row = widths.len() - 1;
        for (row, &width) in widths.iter().enumerate() {
            let boundary: Vec<bool> = (0..width)
                .map(|offset| row == 0 || row == last_row || offset == 0 || offset == width - 1)
                .collect();
            builder.push_row(row as u8, &boundary);
        }

        // widest row; above it rows grow by one cell, below it they shrink
        let mid = widths.len() / 2;
        for row in 1..last_row {
            for offset in 1..widths[row] - 1 {
                let (r, o) = (row as u8, offset as u8);
                let (up_left, up_right) = if row <= mid {
                    (Coord::new(r - 1, o - 1), Coord::new(r - 1, o))
                } else {
                    (Coord::new(r - 1, o), Coord::new(r - 1, o + 1))
                };
                let (down_left, down_right) = if row < mid {
                    (Coord::new(r + 1, o), Coord::new(r + 1, o + 1))
                } else {
                    (Coord::new(r + 1, o - 1), Coord::new(r + 1, o))
                };
                let neighbors = [
                    builder.id_at(up_left),
                    builder.id_at(up_right),
                    builder.id_at(Coord::new(r, o + 1)),
                    builder.id_at(down_right),
                    builder.id_at(down_left),
                    builder.id_at(Coord::new(r, o - 1)),
                ];
                if let Some(id) = builder.id_at(Coord::new(r, o)) {
                    builder.cells[id.0].neighbors = neighbors;
                }
            }
        }
        builder.center = builder.id_at(Coord::new(mid as u8, (widths[mid] / 2) as u8));
        builder
    }

    /// Append a row; `boundary[i]` marks the i-th cell as a sentinel. Row
    /// and offset must fit a [`Coord`].
    pub fn add_row(&mut self, boundary: &[bool]) -> Result<Vec<CellId>> {
        let row = u8::try_from(self.rows.len()).map_err(|_| {
            SigmarError::Validation(format!("row {} exceeds the coordinate range", self.rows.len()))
        })?;
        if boundary.len() > usize::from(u8::MAX) + 1 {
            return Err(SigmarError::Validation(format!(
                "row {row} has {} cells, at most 256 fit",
                boundary.len()
            )));
        }
        Ok(self.push_row(row, boundary))
    }

    /// Wire all six neighbours of `cell`, in cyclic order
    pub fn wire(&mut self, cell: CellId, neighbors: &[CellId]) -> Result<()> {
        let coord = self.coord_of(cell)?;
        if neighbors.len() != 6 {
            return Err(SigmarError::Validation(format!(
                "cell {coord} needs 6 neighbours, got {}",
                neighbors.len()
            )));
        }
        let mut slots = [None; 6];
        for (slot, &neighbor) in slots.iter_mut().zip(neighbors) {
            self.coord_of(neighbor)?;
            if neighbor == cell {
                return Err(SigmarError::Validation(format!("cell {coord} cannot neighbour itself")));
            }
            *slot = Some(neighbor);
        }
        self.cells[cell.0].neighbors = slots;
        Ok(())
    }

    pub fn set_center(&mut self, cell: CellId) -> Result<()> {
        self.coord_of(cell)?;
        self.center = Some(cell);
        Ok(())
    }

    pub fn set_marble(&mut self, cell: CellId, marble: Option<Marble>) -> Result<()> {
        let coord = self.coord_of(cell)?;
        if marble.is_some() && self.cells[cell.0].boundary {
            return Err(SigmarError::Validation(format!("cell {coord} is a boundary cell")));
        }
        self.cells[cell.0].marble = marble;
        Ok(())
    }

    /// Freeze the topology and compute every free flag
    pub fn build(self) -> Board {
        let mut board = Board {
            cells: self.cells,
            rows: self.rows,
            center: self.center.unwrap_or(CellId(0)),
        };
        board.refresh_all();
        board
    }

    fn push_row(&mut self, row: u8, boundary: &[bool]) -> Vec<CellId> {
        let start = self.cells.len();
        self.cells.extend(
            boundary
                .iter()
                .zip(0..=u8::MAX)
                .map(|(&b, offset)| Cell::new(Coord::new(row, offset), b)),
        );
        self.rows.push(start..self.cells.len());
        (start..self.cells.len()).map(CellId).collect()
    }

    fn id_at(&self, coord: Coord) -> Option<CellId> {
        id_in(&self.rows, coord)
    }

    fn coord_of(&self, cell: CellId) -> Result<Coord> {
        self.cells
            .get(cell.0)
            .map(|c| c.coord)
            .ok_or_else(|| SigmarError::Validation(format!("unknown cell id {}", cell.0)))
    }
}

fn id_in(rows: &[Range<usize>], coord: Coord) -> Option<CellId> {
    let range = rows.get(coord.row as usize)?;
    let index = range.start + coord.offset as usize;
    range.contains(&index).then_some(CellId(index))
}

// ============================================================================
// BOARD
// ============================================================================

/// Fixed grid of cells with frozen adjacency. Only occupancy and the cached
/// free flags change after construction.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) cells: Vec<Cell>,
    rows: Vec<Range<usize>>,
    center: CellId,
}

impl Board {
    pub fn new(layout: Layout) -> Self {
        BoardBuilder::from_layout(layout).build()
    }

    /// Board for an explicit row-width table; only known tables are accepted
    pub fn with_row_widths(widths: &[usize]) -> Result<Self> {
        Ok(Self::new(Layout::from_row_widths(widths)?))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Generation seed point
    pub fn center(&self) -> CellId {
        self.center
    }

    pub fn get(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn id_at(&self, coord: Coord) -> Option<CellId> {
        id_in(&self.rows, coord)
    }

    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.id_at(coord).map(|id| &self[id])
    }

    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self[id].neighbor(direction)
    }

    /// All cells with their ids, row-major
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, cell)| (CellId(i), cell))
    }

    /// Rows in order, boundary cells included
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|range| &self.cells[range.clone()])
    }

    /// Non-boundary cells, row-major
    pub fn playable_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.iter().filter(|(_, c)| !c.boundary).map(|(id, _)| id)
    }

    /// Write occupancy and refresh the free flags of the cell and its six
    /// neighbours. Returns the marble previously held.
    pub fn set_marble(&mut self, id: CellId, marble: Option<Marble>) -> Result<Option<Marble>> {
        let cell = self
            .cells
            .get_mut(id.0)
            .ok_or_else(|| SigmarError::Validation(format!("unknown cell id {}", id.0)))?;
        if marble.is_some() && cell.boundary {
            return Err(SigmarError::Validation(format!(
                "cell {} is a boundary cell",
                cell.coord
            )));
        }
        let previous = std::mem::replace(&mut cell.marble, marble);
        free::recompute(self, id, true);
        Ok(previous)
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.marble = None;
        }
        self.refresh_all();
    }

    /// All six neighbours hold a marble
    pub fn is_enclosed(&self, id: CellId) -> bool {
        let cell = &self[id];
        cell.neighbors
            .iter()
            .all(|n| n.is_some_and(|n| self[n].marble.is_some()))
    }

    /// Occupied, free, non-boundary cells in row-major order
    pub fn occupied_interactable_cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.iter()
            .filter(|(_, c)| !c.boundary && c.free && c.marble.is_some())
            .map(|(id, _)| id)
    }

    /// Every placed marble with its position, row-major
    pub fn occupancy(&self) -> Vec<(Coord, Marble)> {
        self.cells
            .iter()
            .filter_map(|c| c.marble.map(|m| (c.coord, m)))
            .collect()
    }

    pub fn marble_count(&self) -> usize {
        self.cells.iter().filter(|c| c.marble.is_some()).count()
    }

    fn refresh_all(&mut self) {
        for i in 0..self.cells.len() {
            free::recompute(self, CellId(i), false);
        }
    }
}

impl Index<CellId> for Board {
    type Output = Cell;

    fn index(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(board: &Board, row: u8, offset: u8) -> CellId {
        board.id_at(Coord::new(row, offset)).unwrap()
    }

    #[test]
    fn test_layout_shape() {
        let board = Board::new(Layout::Small);
        let widths: Vec<usize> = board.rows().map(|row| row.len()).collect();
        assert_eq!(widths, SMALL_ROW_WIDTHS);
        assert_eq!(board.len(), 51);
        assert_eq!(board.playable_cells().count(), 29);
        assert_eq!(board[board.center()].coord(), Coord::new(3, 4));
        assert_eq!(board.marble_count(), 0);
    }

    #[test]
    fn test_boundary_marking() {
        let board = Board::new(Layout::Small);
        for (row_idx, row) in board.rows().enumerate() {
            for (offset, cell) in row.iter().enumerate() {
                let expected = row_idx == 0 || row_idx == 6 || offset == 0 || offset == row.len() - 1;
                assert_eq!(cell.is_boundary(), expected, "at {}", cell.coord());
                assert_eq!(cell.neighbors().count(), if expected { 0 } else { 6 });
            }
        }
    }

    #[test]
    fn test_reciprocity() {
        let board = Board::new(Layout::Small);
        for cell_id in board.playable_cells() {
            for dir in Direction::ALL {
                let other = board.neighbor(cell_id, dir).unwrap();
                if !board[other].is_boundary() {
                    assert_eq!(
                        board.neighbor(other, dir.opposite()),
                        Some(cell_id),
                        "{:?} of {}",
                        dir,
                        board[cell_id].coord()
                    );
                }
            }
        }
    }

    #[test]
    fn test_known_neighbours() {
        let board = Board::new(Layout::Small);
        // upper half, middle row and lower half each shift differently
        let top = id(&board, 2, 3);
        assert_eq!(board.neighbor(top, Direction::UpLeft), Some(id(&board, 1, 2)));
        assert_eq!(board.neighbor(top, Direction::DownRight), Some(id(&board, 3, 4)));
        let mid = id(&board, 3, 4);
        assert_eq!(board.neighbor(mid, Direction::UpRight), Some(id(&board, 2, 4)));
        assert_eq!(board.neighbor(mid, Direction::DownLeft), Some(id(&board, 4, 3)));
        let low = id(&board, 4, 3);
        assert_eq!(board.neighbor(low, Direction::UpLeft), Some(id(&board, 3, 3)));
        assert_eq!(board.neighbor(low, Direction::DownRight), Some(id(&board, 5, 3)));
    }

    #[test]
    fn test_empty_board_all_free() {
        let board = Board::new(Layout::Small);
        assert!(board.iter().all(|(_, c)| c.is_free()));
        assert_eq!(board.occupied_interactable_cells().count(), 0);
    }

    #[test]
    fn test_layout_configuration() {
        assert_eq!(Layout::from_name("small"), Ok(Layout::Small));
        assert!(matches!(Layout::from_name("normal"), Err(SigmarError::Configuration(_))));
        assert!(Board::with_row_widths(&SMALL_ROW_WIDTHS).is_ok());
        assert!(matches!(
            Board::with_row_widths(&[7, 8, 9, 10, 9, 8, 7]),
            Err(SigmarError::Configuration(_))
        ));
    }

    #[test]
    fn test_set_marble_rejects_boundary() {
        let mut board = Board::new(Layout::Small);
        let edge = id(&board, 0, 2);
        let err = board.set_marble(edge, Some(Marble::Salt)).unwrap_err();
        assert!(matches!(err, SigmarError::Validation(_)));
        assert!(board[edge].is_empty());
        // emptying a sentinel is a no-op, not an error
        assert_eq!(board.set_marble(edge, None), Ok(None));
    }

    #[test]
    fn test_set_marble_returns_previous_and_clear() {
        let mut board = Board::new(Layout::Small);
        let c = board.center();
        assert_eq!(board.set_marble(c, Some(Marble::GOLD)), Ok(None));
        assert_eq!(board.set_marble(c, Some(Marble::Salt)), Ok(Some(Marble::GOLD)));
        board.clear();
        assert_eq!(board.marble_count(), 0);
        assert!(board.iter().all(|(_, c)| c.is_free()));
    }

    #[test]
    fn test_enclosed() {
        let mut board = Board::new(Layout::Small);
        let c = board.center();
        assert!(!board.is_enclosed(c));
        let around: Vec<CellId> = board[c].neighbors().collect();
        for n in around {
            board.set_marble(n, Some(Marble::Salt)).unwrap();
        }
        assert!(board.is_enclosed(c));
        // cells touching the boundary ring can never be enclosed
        assert!(!board.is_enclosed(id(&board, 1, 1)));
    }

    #[test]
    fn test_builder_wire_validation() {
        let mut builder = BoardBuilder::new();
        let ids = builder.add_row(&[false; 7]).unwrap();
        assert!(builder.wire(ids[0], &ids[1..]).is_ok());
        assert!(matches!(builder.wire(ids[0], &ids[1..4]), Err(SigmarError::Validation(_))));
        assert!(matches!(builder.wire(ids[0], &ids[..6]), Err(SigmarError::Validation(_))));
        let mut other = BoardBuilder::new();
        let foreign = other.add_row(&[false; 20]).unwrap();
        assert!(matches!(builder.wire(ids[0], &foreign[10..16]), Err(SigmarError::Validation(_))));
        assert!(matches!(builder.set_center(foreign[19]), Err(SigmarError::Validation(_))));
    }

    #[test]
    fn test_builder_rejects_oversized_coordinates() {
        let mut builder = BoardBuilder::new();
        assert!(matches!(builder.add_row(&[false; 257]), Err(SigmarError::Validation(_))));
        let widest = builder.add_row(&[false; 256]).unwrap();
        let partial = builder.clone().build();
        assert_eq!(partial[widest[255]].coord(), Coord::new(0, 255));

        for _ in 1..256 {
            builder.add_row(&[false]).unwrap();
        }
        assert!(matches!(builder.add_row(&[false]), Err(SigmarError::Validation(_))));
        let board = builder.build();
        assert_eq!(board.rows().count(), 256);
        assert_eq!(board.id_at(Coord::new(255, 0)).map(|id| board[id].coord()), Some(Coord::new(255, 0)));
    }

    #[test]
    fn test_occupied_interactable_order() {
        let mut board = Board::new(Layout::Small);
        let a = id(&board, 4, 2);
        let b = id(&board, 1, 3);
        board.set_marble(a, Some(Marble::WIND)).unwrap();
        board.set_marble(b, Some(Marble::FIRE)).unwrap();
        let found: Vec<CellId> = board.occupied_interactable_cells().collect();
        assert_eq!(found, vec![b, a]);
        let occupancy = board.occupancy();
        assert_eq!(occupancy, vec![(Coord::new(1, 3), Marble::FIRE), (Coord::new(4, 2), Marble::WIND)]);
    }
}
