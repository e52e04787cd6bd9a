//! Move-suggestion strategies
//!
//! The board exposes suggestion as a polymorphic seam: anything that can
//! look at the position and name a legal coordinate plugs in here. The only
//! built-in implementation picks uniformly among free cells; real
//! heuristics substitute through the same trait without touching `Board`.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::coord::Coord;

/// A source of move suggestions for the player to move
pub trait MoveStrategy {
    /// Propose a legal coordinate for the current position, or `None` if
    /// the strategy has nothing to offer
    fn propose(&mut self, board: &Board) -> Option<Coord>;
}

/// Uniform random choice among free cells
pub struct RandomMover {
    rng: ChaCha8Rng,
}

impl RandomMover {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveStrategy for RandomMover {
    fn propose(&mut self, board: &Board) -> Option<Coord> {
        let free: Vec<Coord> = board.free_cells().collect();
        free.choose(&mut self.rng).copied()
    }
}
