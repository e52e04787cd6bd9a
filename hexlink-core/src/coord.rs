//! Rhombic hex-grid coordinates and their textual form

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HexError;

/// Smallest playable board edge
pub const MIN_BOARD_SIZE: usize = 4;

/// Largest playable board edge
pub const MAX_BOARD_SIZE: usize = 11;

const ALPHABET_SIZE: u32 = 26;

/// A cell on the rhombic board, row-major
///
/// Rows render as letter sequences (`A`..`Z`, `AA`, `AB`, ...), columns as
/// 1-based numbers, so the cell at (1, 2) displays as `B,3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check this coordinate against a board edge length
    pub fn in_bounds(&self, size: usize) -> bool {
        (self.row as usize) < size && (self.col as usize) < size
    }

    /// Linearize into a cell index for dense-set storage
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    /// Inverse of [`Coord::to_index`]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: (index / size) as u8,
            col: (index % size) as u8,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", row_letters(self.row as u32), self.col as u32 + 1)
    }
}

impl FromStr for Coord {
    type Err = HexError;

    /// Parse the display form: a letter sequence, an optional comma, then a
    /// 1-based column number. Letters outside `A`..`Z` are rejected before
    /// decoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = move || HexError::InvalidCoord(s.to_string());

        let letters_end = s
            .bytes()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, rest) = s.split_at(letters_end);
        let mut rest = rest.trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest);
        let rest = rest.trim();

        if letters.is_empty() || rest.is_empty() {
            return Err(bad());
        }
        let row = parse_row_letters(letters).ok_or_else(|| bad())?;
        let col: u32 = rest.parse().map_err(|_| bad())?;
        if col == 0 || col > u8::MAX as u32 + 1 || row > u8::MAX as u32 {
            return Err(bad());
        }
        Ok(Coord::new(row as u8, (col - 1) as u8))
    }
}

/// Encode a zero-based row as a bijective base-26 letter sequence
fn row_letters(mut row: u32) -> String {
    let mut buf = Vec::new();
    loop {
        buf.push(b'A' + (row % ALPHABET_SIZE) as u8);
        if row < ALPHABET_SIZE {
            break;
        }
        row = row / ALPHABET_SIZE - 1;
    }
    buf.reverse();
    // Only ASCII uppercase letters were pushed
    String::from_utf8(buf).unwrap_or_default()
}

/// Decode a letter sequence back into a zero-based row
fn parse_row_letters(letters: &str) -> Option<u32> {
    let mut value: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        value = value.checked_mul(ALPHABET_SIZE)?.checked_add(digit)?;
    }
    value.checked_sub(1)
}

/// Hex adjacency deltas as (d_row, d_col)
///
/// Under the row-major rhombic encoding each cell touches the four
/// orthogonal neighbors plus the two short diagonals.
pub const NEIGHBOR_DELTAS: [(i8, i8); 6] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, -1),
];

/// Enumerate the in-bounds neighbors of a cell index
///
/// Deltas are applied in (row, col) space and bounds-checked per component,
/// so the last cell of a row is never treated as adjacent to the first cell
/// of the next row even though their raw indices differ by one.
pub fn neighbors(index: usize, size: usize) -> impl Iterator<Item = usize> {
    let row = (index / size) as i32;
    let col = (index % size) as i32;
    NEIGHBOR_DELTAS.iter().filter_map(move |&(dr, dc)| {
        let (r, c) = (row + dr as i32, col + dc as i32);
        if r >= 0 && r < size as i32 && c >= 0 && c < size as i32 {
            Some(r as usize * size + c as usize)
        } else {
            None
        }
    })
}
