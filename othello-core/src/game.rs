//! Board state, move legality and flip-capture application

use crate::board::{Square, BOARD_SIZE, DIRECTIONS};
use crate::error::{BoardParseError, MoveError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Black = 0,
    White = 1,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::Black, Player::White];

    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Cell state occupied by this player's discs
    pub fn cell(self) -> Cell {
        match self {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => f.pad("Black"),
            Player::White => f.pad("White"),
        }
    }
}

/// Contents of one square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Owner of the disc on this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => 'B',
            Cell::White => 'W',
        }
    }

    fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '.' | '-' => Some(Cell::Empty),
            'B' | 'b' | 'X' | 'x' => Some(Cell::Black),
            'W' | 'w' | 'O' | 'o' => Some(Cell::White),
            _ => None,
        }
    }
}

/// Disc counts per player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    pub fn total(&self) -> u32 {
        self.black + self.white
    }
}

/// Winner of a (finished) game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Winner(p) => Some(p),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner(p) => write!(f, "{} wins", p),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

/// A move is the square a disc is placed on
pub type Move = Square;

// ============================================================================
// BOARD
// ============================================================================

/// 8x8 board (clone to explore hypothetical futures)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard start position: two discs each on the central diagonals
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; 8]; 8];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Self { cells }
    }

    /// Board with no discs at all
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; 8]; 8],
        }
    }

    /// Build an arbitrary position
    pub fn from_cells(cells: [[Cell; 8]; 8]) -> Self {
        Self { cells }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Cell at square, `None` when off the board
    pub fn get(&self, sq: Square) -> Option<Cell> {
        if sq.is_valid() {
            Some(self.cells[sq.row as usize][sq.col as usize])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row as usize][sq.col as usize] = cell;
    }

    /// Iterate (square, cell) pairs in row-major order
    pub fn squares(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        Square::all().map(move |sq| (sq, self.cells[sq.row as usize][sq.col as usize]))
    }

    // ========================================================================
    // MOVE LEGALITY
    // ========================================================================

    /// Discs captured in one direction: a run of opponent discs closed off by
    /// one of `player`'s own discs. Empty when the ray leaves the board or
    /// meets an empty square first.
    fn ray_captures(&self, from: Square, dir: (i8, i8), player: Player, out: &mut Vec<Square>) {
        let own = player.cell();
        let opp = player.opponent().cell();
        let start = out.len();
        let mut current = from.step(dir);

        while let Some(cell) = self.get(current) {
            if cell == opp {
                out.push(current);
                current = current.step(dir);
            } else if cell == own {
                return;
            } else {
                break;
            }
        }

        // Ran off the board or into an empty square: nothing captured here
        out.truncate(start);
    }

    fn ray_captures_any(&self, from: Square, dir: (i8, i8), player: Player) -> bool {
        let own = player.cell();
        let opp = player.opponent().cell();
        let mut current = from.step(dir);
        let mut seen_opponent = false;

        while let Some(cell) = self.get(current) {
            if cell == opp {
                seen_opponent = true;
                current = current.step(dir);
            } else {
                return cell == own && seen_opponent;
            }
        }

        false
    }

    /// Union of all capture runs for a placement at `sq`.
    /// Empty if the move is not legal.
    pub fn captures(&self, sq: Square, player: Player) -> Vec<Square> {
        let mut flips = Vec::new();
        if self.get(sq) != Some(Cell::Empty) {
            return flips;
        }
        for dir in DIRECTIONS {
            self.ray_captures(sq, dir, player, &mut flips);
        }
        flips
    }

    /// Check if `player` may place a disc at `sq`
    pub fn is_valid(&self, sq: Square, player: Player) -> bool {
        if self.get(sq) != Some(Cell::Empty) {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.ray_captures_any(sq, dir, player))
    }

    /// All legal placements for `player` (row-major, but callers should not
    /// depend on the order)
    pub fn valid_moves(&self, player: Player) -> Vec<Move> {
        Square::all().filter(|&sq| self.is_valid(sq, player)).collect()
    }

    /// Number of legal placements for `player`
    pub fn mobility(&self, player: Player) -> usize {
        Square::all().filter(|&sq| self.is_valid(sq, player)).count()
    }

    pub fn has_valid_move(&self, player: Player) -> bool {
        Square::all().any(|sq| self.is_valid(sq, player))
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Place a disc and flip every captured disc.
    ///
    /// Returns the number of flipped discs. On error the board is untouched.
    pub fn try_apply(&mut self, sq: Square, player: Player) -> Result<usize, MoveError> {
        match self.get(sq) {
            None => return Err(MoveError::OffBoard(sq)),
            Some(Cell::Empty) => {}
            Some(_) => return Err(MoveError::Occupied(sq)),
        }

        let flips = self.captures(sq, player);
        if flips.is_empty() {
            return Err(MoveError::NoCaptures(sq));
        }

        let own = player.cell();
        self.set(sq, own);
        for &flip in &flips {
            self.set(flip, own);
        }

        Ok(flips.len())
    }

    /// Place a disc for `player`; returns `false` (and changes nothing) if the
    /// move is not legal
    pub fn apply(&mut self, sq: Square, player: Player) -> bool {
        self.try_apply(sq, player).is_ok()
    }

    // ========================================================================
    // SCORING
    // ========================================================================

    pub fn score(&self) -> Score {
        let mut score = Score::default();
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Black => score.black += 1,
                    Cell::White => score.white += 1,
                    Cell::Empty => {}
                }
            }
        }
        score
    }

    /// Total discs on the board
    pub fn disc_count(&self) -> u32 {
        self.score().total()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c != Cell::Empty)
    }

    /// Neither player can move (the board need not be full)
    pub fn is_terminal(&self) -> bool {
        !self.has_valid_move(Player::Black) && !self.has_valid_move(Player::White)
    }

    /// Player with more discs, or a draw. Reports the current leader when
    /// the game is still going.
    pub fn winner(&self) -> Outcome {
        let score = self.score();
        if score.black > score.white {
            Outcome::Winner(Player::Black)
        } else if score.white > score.black {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        }
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    /// Board with row/column labels, legal moves for `to_move` marked `*`,
    /// and the disc counts underneath
    pub fn pretty(&self, to_move: Player) -> String {
        let mut out = String::from("   ");
        for col in 0..BOARD_SIZE {
            out.push_str(&format!(" {}", col));
        }
        out.push('\n');

        for row in 0..BOARD_SIZE {
            out.push_str(&format!("{}  ", row));
            for col in 0..BOARD_SIZE {
                let sq = Square::new(row, col);
                let cell = self.cells[row as usize][col as usize];
                let ch = if cell == Cell::Empty && self.is_valid(sq, to_move) {
                    '*'
                } else {
                    cell.symbol()
                };
                out.push(' ');
                out.push(ch);
            }
            out.push('\n');
        }

        let score = self.score();
        out.push_str(&format!(
            "Score: Black={} White={}  Moves: Black={} White={}\n",
            score.black,
            score.white,
            self.mobility(Player::Black),
            self.mobility(Player::White)
        ));
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: Vec<String> = row.iter().map(|c| c.symbol().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse 8 rows of `B`/`W`/`.` cells; whitespace between cells and blank
    /// lines are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut cells = [[Cell::Empty; 8]; 8];
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != BOARD_SIZE as usize {
                return Err(BoardParseError::RowLength {
                    row,
                    len: symbols.len(),
                });
            }
            for (col, &ch) in symbols.iter().enumerate() {
                cells[row][col] =
                    Cell::from_symbol(ch).ok_or(BoardParseError::BadCell { row, col, ch })?;
            }
        }

        Ok(Self { cells })
    }
}

// ============================================================================
// TESTS
// ============================================================================
