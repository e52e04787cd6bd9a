//! Error taxonomy for the board engine
//!
//! Every variant is a precondition violation: it is detected before any
//! mutation, so a failed call leaves the board exactly as it was.

use crate::coord::Coord;

/// Errors reported by board operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("coordinate {coord} is outside the {size}x{size} board")]
    OutOfRange { coord: Coord, size: usize },

    #[error("illegal move at {coord}: {reason}")]
    InvalidMove { coord: Coord, reason: MoveRejection },

    #[error("cannot resize to {requested}: {reason}")]
    InvalidConfiguration {
        requested: usize,
        reason: &'static str,
    },

    #[error("the game is already over")]
    GameOver,

    #[error("cannot parse coordinate {0:?}")]
    InvalidCoord(String),
}

/// Why a `place` call was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    CellOccupied,
    GameFinished,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveRejection::CellOccupied => write!(f, "cell is occupied"),
            MoveRejection::GameFinished => write!(f, "game is finished"),
        }
    }
}

pub type Result<T> = std::result::Result<T, HexError>;
