//! Player identities, edges and display preferences

use serde::{Deserialize, Serialize};

/// One of the two fixed player identities
///
/// White connects the top edge (row 0) to the bottom edge (row size-1);
/// Black connects the left edge (column 0) to the right edge
/// (column size-1). The assignment never changes during a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    White = 0,
    Black = 1,
}

/// Both identities, in turn order
pub const PLAYER_IDS: [PlayerId; 2] = [PlayerId::White, PlayerId::Black];

impl PlayerId {
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::White => PlayerId::Black,
            PlayerId::Black => PlayerId::White,
        }
    }

    /// Index into per-player storage
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Immutable default display name; unique per identity
    pub fn default_name(self) -> &'static str {
        match self {
            PlayerId::White => "White",
            PlayerId::Black => "Black",
        }
    }

    /// Immutable default piece color; unique per identity
    pub fn default_color(self) -> Color {
        match self {
            PlayerId::White => Color::WHITE,
            PlayerId::Black => Color::BLACK,
        }
    }

    /// True iff the cell at `index` lies on this player's start edge
    pub fn on_start_edge(self, index: usize, size: usize) -> bool {
        match self {
            PlayerId::White => index / size == 0,
            PlayerId::Black => index % size == 0,
        }
    }

    /// True iff the cell at `index` lies on this player's goal edge
    pub fn on_goal_edge(self, index: usize, size: usize) -> bool {
        match self {
            PlayerId::White => index / size == size - 1,
            PlayerId::Black => index % size == size - 1,
        }
    }
}

/// RGB piece color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
}

/// A player's mutable display preferences
///
/// The identity is fixed; name and color start from the identity defaults
/// and may be changed by the integrating layer. Empty names are rejected.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            name: id.default_name().to_string(),
            color: id.default_color(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Rename the player; ignored if `name` is empty
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}
