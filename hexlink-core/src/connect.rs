//! Incremental edge-to-edge reachability per player
//!
//! For each player two bitsets are maintained over that player's own
//! pieces: `accessible` (transitively connected to the start edge) and
//! `co_accessible` (connected to the goal edge). Both grow monotonically
//! as pieces are placed and are cleared only by a full board reset, so the
//! win test is a single bitset intersection and never rescans the board.

use crate::bitset::BitSet;
use crate::coord::neighbors;
use crate::player::PlayerId;

/// Which edge a reachability set is anchored to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Start,
    Goal,
}

impl Edge {
    fn contains(self, player: PlayerId, index: usize, size: usize) -> bool {
        match self {
            Edge::Start => player.on_start_edge(index, size),
            Edge::Goal => player.on_goal_edge(index, size),
        }
    }
}

/// Reachability state for one player
#[derive(Clone, Debug)]
pub struct Connectivity {
    accessible: BitSet,
    co_accessible: BitSet,
}

impl Connectivity {
    /// Empty tracker for a board of `cells` cells
    pub fn new(cells: usize) -> Self {
        Self {
            accessible: BitSet::new(cells),
            co_accessible: BitSet::new(cells),
        }
    }

    /// Pieces connected to the player's start edge
    pub fn accessible(&self) -> &BitSet {
        &self.accessible
    }

    /// Pieces connected to the player's goal edge
    pub fn co_accessible(&self) -> &BitSet {
        &self.co_accessible
    }

    /// A player has won iff some piece reaches both edges
    pub fn has_won(&self) -> bool {
        self.accessible.intersects(&self.co_accessible)
    }

    /// Forget everything, keeping capacity
    pub fn clear(&mut self) {
        self.accessible.clear_all();
        self.co_accessible.clear_all();
    }

    /// Swap in empty storage for a board of `cells` cells
    pub fn reallocate(&mut self, cells: usize) {
        self.accessible = BitSet::new(cells);
        self.co_accessible = BitSet::new(cells);
    }

    /// Fold a newly placed piece into both reachability sets
    ///
    /// `occupancy` is the owning player's occupancy bitset and must already
    /// contain `index`. Called once per placement, before the turn passes.
    pub fn absorb(&mut self, player: PlayerId, index: usize, occupancy: &BitSet, size: usize) {
        absorb_into(&mut self.accessible, Edge::Start, player, index, occupancy, size);
        absorb_into(&mut self.co_accessible, Edge::Goal, player, index, occupancy, size);
    }

    /// Recompute both sets from scratch (snapshot restore / resize)
    pub fn rebuild(&mut self, player: PlayerId, occupancy: &BitSet, size: usize) {
        self.reallocate(occupancy.len());
        rebuild_set(&mut self.accessible, Edge::Start, player, occupancy, size);
        rebuild_set(&mut self.co_accessible, Edge::Goal, player, occupancy, size);
    }
}

/// Decide whether the piece at `index` reaches `edge`, and if so grow the
/// set by the whole newly connected component.
///
/// A placement can bridge previously separate components, so the closure
/// walks an explicit work list over same-player adjacency rather than
/// adding only the immediate neighbors.
fn absorb_into(
    set: &mut BitSet,
    edge: Edge,
    player: PlayerId,
    index: usize,
    occupancy: &BitSet,
    size: usize,
) {
    let reachable = edge.contains(player, index, size)
        || neighbors(index, size).any(|n| set.get(n));
    if !reachable {
        // Not connected to this edge yet; a later move may bridge it in.
        return;
    }
    set.set(index);
    let mut work = vec![index];
    while let Some(cell) = work.pop() {
        for n in neighbors(cell, size) {
            if occupancy.get(n) && !set.get(n) {
                set.set(n);
                work.push(n);
            }
        }
    }
}

/// Flood from every piece sitting on `edge` through same-player adjacency
fn rebuild_set(set: &mut BitSet, edge: Edge, player: PlayerId, occupancy: &BitSet, size: usize) {
    let mut work: Vec<usize> = occupancy
        .ones()
        .filter(|&i| edge.contains(player, i, size))
        .collect();
    for &i in &work {
        set.set(i);
    }
    while let Some(cell) = work.pop() {
        for n in neighbors(cell, size) {
            if occupancy.get(n) && !set.get(n) {
                set.set(n);
                work.push(n);
            }
        }
    }
}
