//! ASCII rendering of the board
//!
//! Rows are shifted right by half a cell per row so the rhombus and the
//! hex adjacency read correctly: a cell touches the two cells diagonally
//! above-right and below-left of it.

use hexlink_core::{Board, Coord, PlayerId};

/// Marker for White pieces (connects top edge to bottom edge)
pub const WHITE_MARK: char = 'O';
/// Marker for Black pieces (connects left edge to right edge)
pub const BLACK_MARK: char = 'X';

/// Render the position as a shifted rhombus with row letters and column
/// numbers
pub fn board_to_string(board: &Board) -> String {
    let size = board.size();
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..size {
        out.push_str(&format!("{:>3}", col + 1));
    }
    out.push('\n');

    for row in 0..size as u8 {
        let label = Coord::new(row, 0).to_string();
        let letters = label.split(',').next().unwrap_or("?");
        out.push_str(&" ".repeat(row as usize));
        out.push_str(&format!("{letters:>3} "));
        for col in 0..size as u8 {
            let mark = match board.owner_at(Coord::new(row, col)) {
                Ok(Some(PlayerId::White)) => WHITE_MARK,
                Ok(Some(PlayerId::Black)) => BLACK_MARK,
                _ => '.',
            };
            out.push_str(&format!("{mark:>3}"));
        }
        out.push('\n');
    }
    out
}

/// One-line description of whose move it is or who has won
pub fn status_line(board: &Board) -> String {
    for player in [PlayerId::White, PlayerId::Black] {
        if board.has_won(player) {
            return format!("{} has won!", player.default_name());
        }
    }
    format!("{} to move", board.current_player().default_name())
}
