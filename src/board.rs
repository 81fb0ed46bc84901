use crate::{GameError, Position};
use itertools::Itertools;
use rand::Rng;
use std::collections::HashSet;

/// The real minefield. The engine never sees this directly; it only receives
/// clue counts for cells it has played.
#[derive(Debug)]
pub struct Board {
    mines: HashSet<Position>,
    flagged: HashSet<Position>,
    width: u32,
    height: u32,
}

impl Board {
    pub fn new(width: u32, height: u32, mines_count: u32) -> Result<Self, GameError> {
        Self::with_rng(width, height, mines_count, &mut rand::thread_rng())
    }

    /// Builds a board with mines placed by the given generator, so tests and
    /// benches can reproduce layouts from a seed.
    pub fn with_rng<R: Rng>(
        width: u32,
        height: u32,
        mines_count: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if mines_count >= width * height {
            return Err(GameError::TooManyMines {
                width,
                height,
                mines: mines_count,
            });
        }

        let mut mines = HashSet::new();
        while mines.len() < mines_count as usize {
            let row = rng.gen_range(0..height) as i32;
            let col = rng.gen_range(0..width) as i32;
            mines.insert(Position::new(row, col));
        }

        Ok(Board {
            mines,
            flagged: HashSet::new(),
            width,
            height,
        })
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.height as i32 && pos.col >= 0 && pos.col < self.width as i32
    }

    pub fn is_mine(&self, pos: Position) -> Result<bool, GameError> {
        if !self.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(self.mines.contains(&pos))
    }

    /// Number of mines within one row and column of `pos`, not counting
    /// `pos` itself.
    pub fn nearby_mines(&self, pos: Position) -> Result<u8, GameError> {
        if !self.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(pos
            .neighbors()
            .filter(|p| self.mines.contains(p))
            .count() as u8)
    }

    /// Marks a position as a found mine. Idempotent.
    pub fn flag(&mut self, pos: Position) -> Result<(), GameError> {
        if !self.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        self.flagged.insert(pos);
        Ok(())
    }

    pub fn is_flagged(&self, pos: Position) -> bool {
        self.flagged.contains(&pos)
    }

    /// The game is won once every mine has been flagged.
    pub fn is_won(&self) -> bool {
        self.flagged == self.mines
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn mines_count(&self) -> u32 {
        self.mines.len() as u32
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        (0..self.height as i32)
            .cartesian_product(0..self.width as i32)
            .map(|(row, col)| Position::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mine_count_is_exact() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::with_rng(8, 8, 10, &mut rng).unwrap();
        assert_eq!(board.mines_count(), 10);

        let placed = board
            .iter_positions()
            .filter(|&pos| board.is_mine(pos).unwrap())
            .count();
        assert_eq!(placed, 10);
    }

    #[test]
    fn test_too_many_mines_rejected() {
        assert!(matches!(
            Board::new(3, 3, 9),
            Err(GameError::TooManyMines { .. })
        ));
    }

    #[test]
    fn test_nearby_mines_excludes_self_and_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut board = Board::with_rng(4, 4, 0, &mut rng).unwrap();
        board.mines.insert(Position::new(0, 0));
        board.mines.insert(Position::new(0, 1));

        // A mine's own square does not count itself.
        assert_eq!(board.nearby_mines(Position::new(0, 0)).unwrap(), 1);
        assert_eq!(board.nearby_mines(Position::new(1, 1)).unwrap(), 2);
        assert_eq!(board.nearby_mines(Position::new(3, 3)).unwrap(), 0);
        assert!(board.nearby_mines(Position::new(4, 0)).is_err());
    }

    #[test]
    fn test_won_when_all_mines_flagged() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::with_rng(4, 4, 3, &mut rng).unwrap();
        assert!(!board.is_won());

        let mines: Vec<Position> = board
            .iter_positions()
            .filter(|&pos| board.is_mine(pos).unwrap())
            .collect();
        for pos in mines {
            board.flag(pos).unwrap();
        }
        assert!(board.is_won());
    }

    #[test]
    fn test_flagging_a_safe_cell_does_not_win() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::with_rng(4, 4, 3, &mut rng).unwrap();
        let safe = board
            .iter_positions()
            .find(|&pos| !board.is_mine(pos).unwrap())
            .unwrap();
        board.flag(safe).unwrap();
        assert!(!board.is_won());
    }
}
