use super::KnowledgeEngine;
use crate::{Board, Position};
use rand::prelude::*;
use std::collections::HashSet;

/// Configuration for seeded game simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub width: u32,
    pub height: u32,
    pub mines: u32,
    pub max_moves: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            mines: 8,
            max_moves: 200,
        }
    }
}

/// How a simulated game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// Every mine was identified and flagged.
    Won,
    /// A move, safe-claimed or random, hit a mine.
    Lost(Position),
    /// No moves left or move limit reached.
    Stalled,
}

/// One full game's worth of bookkeeping, with everything a validation test
/// needs to check the engine against the ground-truth board.
#[derive(Debug)]
pub struct SimulationReport {
    pub outcome: SimulationOutcome,
    pub moves: Vec<Position>,
    pub safe_moves: usize,
    pub random_moves: usize,
    /// Cells the engine claimed were safe at any point.
    pub claimed_safes: HashSet<Position>,
    /// Cells the engine claimed were mines at any point.
    pub claimed_mines: HashSet<Position>,
    /// The board's actual mine positions.
    pub actual_mines: HashSet<Position>,
}

/// Plays one game from a seed: safe moves preferred, random fallback, clues
/// reported back truthfully, engine-known mines flagged each turn.
pub fn simulate_game(config: &SimulationConfig, seed: u64) -> SimulationReport {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board =
        Board::with_rng(config.width, config.height, config.mines, &mut rng).unwrap();
    let mut engine = KnowledgeEngine::new(config.width, config.height);

    let actual_mines: HashSet<Position> = board
        .iter_positions()
        .filter(|&pos| board.is_mine(pos).unwrap())
        .collect();

    let mut report = SimulationReport {
        outcome: SimulationOutcome::Stalled,
        moves: Vec::new(),
        safe_moves: 0,
        random_moves: 0,
        claimed_safes: HashSet::new(),
        claimed_mines: HashSet::new(),
        actual_mines,
    };

    for _ in 0..config.max_moves {
        let (pick, was_safe_move) = match engine.make_safe_move() {
            Some(pos) => (pos, true),
            None => match engine.make_random_move(&mut rng) {
                Some(pos) => (pos, false),
                None => break,
            },
        };
        report.moves.push(pick);
        if was_safe_move {
            report.safe_moves += 1;
        } else {
            report.random_moves += 1;
        }

        if board.is_mine(pick).unwrap() {
            report.outcome = SimulationOutcome::Lost(pick);
            break;
        }
        engine.report_clue(pick, board.nearby_mines(pick).unwrap());

        report.claimed_safes.extend(engine.safes().iter().copied());
        for &mine in engine.mines() {
            report.claimed_mines.insert(mine);
            board.flag(mine).unwrap();
        }

        let total_safe = config.width * config.height - config.mines;
        if board.is_won() || report.moves.len() as u32 == total_safe {
            report.outcome = SimulationOutcome::Won;
            break;
        }
    }

    report
}

/// Runs `count` seeded games starting from `base_seed`.
pub fn simulate_batch(
    config: &SimulationConfig,
    base_seed: u64,
    count: u64,
) -> Vec<SimulationReport> {
    (0..count)
        .map(|offset| simulate_game(config, base_seed + offset))
        .collect()
}
