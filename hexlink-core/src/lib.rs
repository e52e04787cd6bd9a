//! Hexlink Core - Hex board engine with incremental win detection
//!
//! This crate provides the game model for Hexlink:
//! - Rhombic grid coordinates with letter/number display form
//! - Per-player occupancy as dense bitsets
//! - Incremental edge-to-edge reachability (win detection without
//!   rescanning the board)
//! - Move validation, turn tracking, reset/resize
//! - Synchronous change notification for UI layers
//! - A pluggable move-suggestion strategy seam

pub mod ai;
pub mod bitset;
pub mod board;
pub mod connect;
pub mod coord;
pub mod error;
pub mod player;

// Re-exports for convenient access
pub use ai::{MoveStrategy, RandomMover};
pub use bitset::BitSet;
pub use board::{Board, ObserverId, Snapshot};
pub use connect::Connectivity;
pub use coord::{neighbors, Coord, MAX_BOARD_SIZE, MIN_BOARD_SIZE, NEIGHBOR_DELTAS};
pub use error::{HexError, MoveRejection, Result};
pub use player::{Color, Player, PlayerId, PLAYER_IDS};
