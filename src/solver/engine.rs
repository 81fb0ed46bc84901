use super::Statement;
use crate::Position;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeSet, HashSet};

/// Accumulated logical knowledge about one game.
///
/// The engine only ever hears clue counts through [`report_clue`]; it never
/// sees the real minefield. Knowledge grows monotonically: cells move into
/// `safes` or `mines` and stay there, and the statement list is append-only
/// with duplicates suppressed by equality. Stale statements are left in
/// place rather than pruned, so later closure passes can still subtract
/// against them.
///
/// [`report_clue`]: KnowledgeEngine::report_clue
#[derive(Debug)]
pub struct KnowledgeEngine {
    width: u32,
    height: u32,
    moves_made: HashSet<Position>,
    safes: HashSet<Position>,
    mines: HashSet<Position>,
    statements: Vec<Statement>,
}

impl KnowledgeEngine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            statements: Vec::new(),
        }
    }

    pub fn safes(&self) -> &HashSet<Position> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn moves_made(&self) -> &HashSet<Position> {
        &self.moves_made
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Records that `pos` is a mine and propagates the fact into every
    /// statement. Resolved statements are not removed; the next closure
    /// pass rediscovers whatever they still imply.
    pub fn mark_mine(&mut self, pos: Position) {
        self.mines.insert(pos);
        for statement in &mut self.statements {
            statement.mark_mine(pos);
        }
    }

    /// Records that `pos` is safe and propagates the fact into every
    /// statement.
    pub fn mark_safe(&mut self, pos: Position) {
        self.safes.insert(pos);
        for statement in &mut self.statements {
            statement.mark_safe(pos);
        }
    }

    /// The central inference step, called once per revealed cell with the
    /// count of mines among its neighbors.
    ///
    /// Folds the clue into the knowledge base as a new statement, extracts
    /// whatever is immediately certain, then runs one closure pass: every
    /// statement whose cells are a strict subset of another's is subtracted
    /// from it, and the difference is registered as a new statement. The
    /// pass scans statements appended during the pass as well, so
    /// derivations cascade within a single call; full saturation across a
    /// game comes from the per-turn calls rather than from iterating any
    /// one call to a fixed point.
    pub fn report_clue(&mut self, pos: Position, count: u8) {
        self.moves_made.insert(pos);
        self.mark_safe(pos);

        let clue = Statement::new(self.neighbors(pos), count as usize);
        self.resolve_and_register(&clue);
        if !self.statements.contains(&clue) {
            self.statements.push(clue);
        }

        // Index loops instead of iterators: resolve_and_register both
        // mutates existing statements and appends new ones mid-pass.
        let mut i = 0;
        while i < self.statements.len() {
            let mut j = 0;
            while j < self.statements.len() {
                if i != j && is_strict_subset(&self.statements[i], &self.statements[j]) {
                    let derived = subtract(&self.statements[j], &self.statements[i]);
                    self.resolve_and_register(&derived);
                    if derived.count() != 0
                        && derived.count() != derived.len()
                        && !self.statements.contains(&derived)
                    {
                        self.statements.push(derived);
                    }
                }
                j += 1;
            }
            i += 1;
        }
    }

    /// Extracts the certain facts a statement carries and folds them into
    /// global knowledge. For each resolved cell the remaining members are
    /// also re-registered as a smaller statement, restating what the
    /// original still claims about them.
    ///
    /// Safes are handled before mines; both are idempotent updates, so the
    /// order only affects which restatements get queued first.
    fn resolve_and_register(&mut self, statement: &Statement) {
        for pos in statement.known_safes() {
            self.mark_safe(pos);
            if statement.len() > 1 {
                let reduced = statement.without(pos, 0);
                if !self.statements.contains(&reduced) {
                    self.statements.push(reduced);
                }
            }
        }
        for pos in statement.known_mines() {
            self.mark_mine(pos);
            if statement.len() > 1 {
                let reduced = statement.without(pos, 1);
                if !self.statements.contains(&reduced) {
                    self.statements.push(reduced);
                }
            }
        }
    }

    /// A known-safe cell that has not been played yet, if any. The returned
    /// cell is recorded as played. No ordering guarantee when several
    /// qualify.
    pub fn make_safe_move(&mut self) -> Option<Position> {
        let pos = self
            .safes
            .iter()
            .find(|pos| !self.moves_made.contains(pos))
            .copied()?;
        self.moves_made.insert(pos);
        Some(pos)
    }

    /// A uniformly random cell that has not been played and is not a known
    /// mine, or `None` when no such cell remains. Unlike
    /// [`make_safe_move`], the move is not recorded; that is the caller's
    /// job once it actually plays the cell.
    ///
    /// [`make_safe_move`]: KnowledgeEngine::make_safe_move
    pub fn make_random_move<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        let candidates: Vec<Position> = (0..self.height as i32)
            .cartesian_product(0..self.width as i32)
            .map(|(row, col)| Position::new(row, col))
            .filter(|pos| !self.moves_made.contains(pos) && !self.mines.contains(pos))
            .collect();
        candidates.choose(rng).copied()
    }

    /// In-bounds cells within one row and column of `pos`, excluding `pos`.
    pub fn neighbors(&self, pos: Position) -> BTreeSet<Position> {
        pos.neighbors()
            .filter(|p| {
                p.row >= 0
                    && p.row < self.height as i32
                    && p.col >= 0
                    && p.col < self.width as i32
            })
            .collect()
    }
}

fn is_strict_subset(a: &Statement, b: &Statement) -> bool {
    a.cells().len() < b.cells().len() && a.cells().is_subset(b.cells())
}

/// `b` minus `a`: the cells of `b` outside `a` hold exactly the mines of `b`
/// not accounted for by `a`.
fn subtract(b: &Statement, a: &Statement) -> Statement {
    Statement::new(
        b.cells().difference(a.cells()).copied(),
        b.count() - a.count(),
    )
}
