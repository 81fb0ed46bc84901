pub mod board;
pub mod error;
pub mod game;
pub mod position;
pub mod solver;

pub use board::Board;
pub use error::GameError;
pub use game::{Game, GameState, Move};
pub use position::Position;
pub use solver::{KnowledgeEngine, Statement};
