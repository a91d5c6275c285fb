//! Board geometry with (row, col) coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Board side length
pub const BOARD_SIZE: i8 = 8;

/// Row/column coordinates, 0-indexed from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Step one square in a direction (may leave the board, never overflows)
    pub fn step(&self, (dr, dc): (i8, i8)) -> Square {
        Square::new(self.row.wrapping_add(dr), self.col.wrapping_add(dc))
    }

    /// Flat index into a row-major 64-cell array, `None` off the board
    pub fn index(&self) -> Option<usize> {
        self.is_valid()
            .then(|| self.row as usize * BOARD_SIZE as usize + self.col as usize)
    }

    pub fn is_corner(&self) -> bool {
        CORNERS.contains(self)
    }

    pub fn is_edge(&self) -> bool {
        self.is_valid()
            && (self.row == 0 || self.row == BOARD_SIZE - 1 || self.col == 0 || self.col == BOARD_SIZE - 1)
    }

    /// Iterate every square in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }
}

impl From<(i8, i8)> for Square {
    fn from((row, col): (i8, i8)) -> Self {
        Square::new(row, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The eight compass directions (dr, dc)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), // NW
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, -1),  // W
    (0, 1),   // E
    (1, -1),  // SW
    (1, 0),   // S
    (1, 1),   // SE
];

/// The four corner squares
pub const CORNERS: [Square; 4] = [
    Square::new(0, 0),
    Square::new(0, 7),
    Square::new(7, 0),
    Square::new(7, 7),
];

/// Squares next to a corner; occupying them tends to hand the corner over
pub const DANGER_SQUARES: [Square; 12] = [
    // Top-left
    Square::new(0, 1),
    Square::new(1, 0),
    Square::new(1, 1),
    // Top-right
    Square::new(0, 6),
    Square::new(1, 6),
    Square::new(1, 7),
    // Bottom-left
    Square::new(6, 0),
    Square::new(6, 1),
    Square::new(7, 1),
    // Bottom-right
    Square::new(6, 6),
    Square::new(6, 7),
    Square::new(7, 6),
];
