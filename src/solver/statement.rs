use crate::Position;
use std::collections::BTreeSet;
use std::fmt;

/// A logical claim about the board: exactly `count` of `cells` are mines.
///
/// Statements shrink in place as individual cells are resolved; the cell set
/// and count always describe only the still-unresolved members. The backing
/// `BTreeSet` keeps the cells canonical, so equality ignores the order in
/// which cells were gathered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    cells: BTreeSet<Position>,
    count: usize,
}

impl Statement {
    pub fn new(cells: impl IntoIterator<Item = Position>, count: usize) -> Self {
        let cells: BTreeSet<Position> = cells.into_iter().collect();
        debug_assert!(
            count <= cells.len(),
            "contradictory statement: {} mines among {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Position> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells certain to be mines: the whole set when every remaining cell
    /// must be one, otherwise nothing.
    pub fn known_mines(&self) -> BTreeSet<Position> {
        if self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Cells certain to be safe: the whole set when no remaining cell can be
    /// a mine, otherwise nothing.
    pub fn known_safes(&self) -> BTreeSet<Position> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Removes a member now known to be a mine. One fewer cell, one fewer
    /// required mine. No-op for non-members.
    pub fn mark_mine(&mut self, pos: Position) {
        if self.cells.remove(&pos) {
            self.count -= 1;
        }
    }

    /// Removes a member now known to be safe. The mine tally is unchanged.
    /// No-op for non-members.
    pub fn mark_safe(&mut self, pos: Position) {
        self.cells.remove(&pos);
    }

    /// The restatement left after dropping one resolved cell: same cells
    /// minus `pos`, with `count` lowered by `count_delta` (1 when the cell
    /// was a mine, 0 when it was safe).
    pub fn without(&self, pos: Position, count_delta: usize) -> Statement {
        let mut cells = self.cells.clone();
        cells.remove(&pos);
        Statement::new(cells, self.count - count_delta)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} = {}", self.cells, self.count)
    }
}
