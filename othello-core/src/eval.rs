//! Position evaluation
//!
//! The score is a phase-weighted sum of five signals, always signed for the
//! perspective player: disc count, mobility, corners, edges and the squares
//! next to corners.

use crate::board::{Square, BOARD_SIZE, CORNERS, DANGER_SQUARES};
use crate::game::{Board, Cell, Player};
use serde::{Deserialize, Serialize};

/// Per-corner value
pub const CORNER_VALUE: i32 = 25;

/// Per-edge-cell value (corners are scanned by two edges)
pub const EDGE_VALUE: i32 = 5;

/// Penalty for occupying a square next to a corner
pub const DANGER_VALUE: i32 = 10;

/// Disc totals at which the game switches to the mid and end phases
pub const MID_GAME_DISCS: u32 = 20;
pub const END_GAME_DISCS: u32 = 50;

// ============================================================================
// PHASES
// ============================================================================

/// Coarse game phase, by discs on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Early,
    Mid,
    End,
}

/// Multipliers applied to each raw signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhaseWeights {
    pub disc: i32,
    pub mobility: i32,
    pub corner: i32,
    pub edge: i32,
    pub danger: i32,
}

const EARLY_WEIGHTS: PhaseWeights = PhaseWeights {
    disc: 1,
    mobility: 10,
    corner: 5,
    edge: 2,
    danger: 3,
};

const MID_WEIGHTS: PhaseWeights = PhaseWeights {
    disc: 2,
    mobility: 5,
    corner: 10,
    edge: 3,
    danger: 2,
};

const END_WEIGHTS: PhaseWeights = PhaseWeights {
    disc: 10,
    mobility: 1,
    corner: 5,
    edge: 2,
    danger: 0,
};

impl Phase {
    pub fn from_disc_count(discs: u32) -> Self {
        if discs < MID_GAME_DISCS {
            Phase::Early
        } else if discs < END_GAME_DISCS {
            Phase::Mid
        } else {
            Phase::End
        }
    }

    pub fn of(board: &Board) -> Self {
        Self::from_disc_count(board.disc_count())
    }

    pub fn weights(self) -> PhaseWeights {
        match self {
            Phase::Early => EARLY_WEIGHTS,
            Phase::Mid => MID_WEIGHTS,
            Phase::End => END_WEIGHTS,
        }
    }
}

// ============================================================================
// SIGNALS
// ============================================================================

/// Raw (unweighted) evaluation signals for one perspective
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalTerms {
    pub disc: i32,
    pub mobility: i32,
    pub corner: i32,
    pub edge: i32,
    pub danger: i32,
}

/// +value for `player`'s disc, -value for the opponent's, 0 when empty
fn occupancy(cell: Cell, player: Player, value: i32) -> i32 {
    match cell.owner() {
        Some(owner) if owner == player => value,
        Some(_) => -value,
        None => 0,
    }
}

fn cell_at(board: &Board, row: i8, col: i8) -> Cell {
    board.get(Square::new(row, col)).unwrap_or(Cell::Empty)
}

impl EvalTerms {
    pub fn compute(board: &Board, player: Player) -> Self {
        let opponent = player.opponent();
        let score = board.score();

        let disc = score.of(player) as i32 - score.of(opponent) as i32;
        let mobility = board.mobility(player) as i32 - board.mobility(opponent) as i32;

        let corner: i32 = CORNERS
            .iter()
            .map(|&sq| occupancy(cell_at(board, sq.row, sq.col), player, CORNER_VALUE))
            .sum();

        // Four edge scans; each corner is seen by two of them
        let last = BOARD_SIZE - 1;
        let mut edge = 0;
        for i in 0..BOARD_SIZE {
            edge += occupancy(cell_at(board, 0, i), player, EDGE_VALUE);
            edge += occupancy(cell_at(board, last, i), player, EDGE_VALUE);
            edge += occupancy(cell_at(board, i, 0), player, EDGE_VALUE);
            edge += occupancy(cell_at(board, i, last), player, EDGE_VALUE);
        }

        let danger: i32 = DANGER_SQUARES
            .iter()
            .map(|&sq| -occupancy(cell_at(board, sq.row, sq.col), player, DANGER_VALUE))
            .sum();

        Self {
            disc,
            mobility,
            corner,
            edge,
            danger,
        }
    }

    pub fn weighted(&self, w: PhaseWeights) -> i32 {
        self.disc * w.disc
            + self.mobility * w.mobility
            + self.corner * w.corner
            + self.edge * w.edge
            + self.danger * w.danger
    }
}

/// Evaluate `board` from `player`'s perspective (positive favours `player`)
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let terms = EvalTerms::compute(board, player);
    terms.weighted(Phase::of(board).weights())
}

// ============================================================================
// TESTS
// ============================================================================
