use crate::{Board, GameError, KnowledgeEngine, Position};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// What one turn did, for callers that narrate the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Move {
    Safe(Position),
    Random(Position),
    /// Every remaining cell is played or known to be a mine.
    Exhausted,
}

/// Drives one game: owns the board and the engine, plays one cell per step,
/// and feeds clue counts back. The engine does all the thinking; this is
/// just the turn loop the engine's contract expects.
pub struct Game {
    board: Board,
    engine: KnowledgeEngine,
    state: GameState,
    revealed_count: u32,
}

impl Game {
    pub fn new(width: u32, height: u32, mines_count: u32) -> Result<Self, GameError> {
        let board = Board::new(width, height, mines_count)?;
        Ok(Self {
            engine: KnowledgeEngine::new(width, height),
            board,
            state: GameState::Playing,
            revealed_count: 0,
        })
    }

    pub fn from_parts(board: Board, engine: KnowledgeEngine) -> Self {
        Self {
            board,
            engine,
            state: GameState::Playing,
            revealed_count: 0,
        }
    }

    /// Plays one cell: a known-safe one when available, a random fallback
    /// otherwise. Reveals it, reports the clue to the engine, flags every
    /// mine the engine now knows, and updates the game state.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<Move, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        let played = match self.engine.make_safe_move() {
            Some(pos) => Move::Safe(pos),
            None => match self.engine.make_random_move(rng) {
                Some(pos) => Move::Random(pos),
                None => {
                    self.state = self.resolve_exhausted();
                    return Ok(Move::Exhausted);
                }
            },
        };
        let pos = match played {
            Move::Safe(pos) | Move::Random(pos) => pos,
            Move::Exhausted => unreachable!(),
        };

        if self.board.is_mine(pos)? {
            self.state = GameState::Lost;
            return Ok(played);
        }

        self.revealed_count += 1;
        let clue = self.board.nearby_mines(pos)?;
        self.engine.report_clue(pos, clue);

        for &mine in self.engine.mines() {
            self.board.flag(mine)?;
        }
        if self.board.is_won() || self.all_safe_cells_revealed() {
            self.state = GameState::Won;
        }

        Ok(played)
    }

    fn all_safe_cells_revealed(&self) -> bool {
        let (width, height) = self.board.dimensions();
        self.revealed_count == width * height - self.board.mines_count()
    }

    fn resolve_exhausted(&self) -> GameState {
        // With no playable cell left, the game is won exactly when the
        // engine's mine knowledge covers the whole minefield.
        if self.board.is_won() || self.all_safe_cells_revealed() {
            GameState::Won
        } else {
            GameState::Lost
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn engine(&self) -> &KnowledgeEngine {
        &self.engine
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mine_free_board_is_always_won() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::with_rng(4, 4, 0, &mut rng).unwrap();
        let mut game = Game::from_parts(board, KnowledgeEngine::new(4, 4));

        while game.state() == GameState::Playing {
            game.step(&mut rng).unwrap();
        }
        assert_eq!(game.state(), GameState::Won);
    }

    #[test]
    fn test_game_reaches_a_terminal_state() {
        let mut rng = StdRng::seed_from_u64(5);
        let board = Board::with_rng(8, 8, 8, &mut rng).unwrap();
        let mut game = Game::from_parts(board, KnowledgeEngine::new(8, 8));

        for _ in 0..200 {
            if game.state() != GameState::Playing {
                break;
            }
            game.step(&mut rng).unwrap();
        }
        assert_ne!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_step_after_game_over_is_an_error() {
        let mut rng = StdRng::seed_from_u64(11);
        let board = Board::with_rng(2, 2, 0, &mut rng).unwrap();
        let mut game = Game::from_parts(board, KnowledgeEngine::new(2, 2));

        while game.state() == GameState::Playing {
            game.step(&mut rng).unwrap();
        }
        assert!(matches!(
            game.step(&mut rng),
            Err(GameError::InvalidGameState)
        ));
    }
}
