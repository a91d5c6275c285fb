//! Game session - the authoritative board plus whose turn it is

use crate::ai::MinimaxAI;
use crate::board::Square;
use crate::error::MoveError;
use crate::game::{Board, Move, Outcome, Player, Score};
use serde::{Deserialize, Serialize};

/// One entry of the move history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Play { player: Player, square: Square, flipped: usize },
    Pass { player: Player },
}

impl Turn {
    pub fn player(&self) -> Player {
        match *self {
            Turn::Play { player, .. } | Turn::Pass { player } => player,
        }
    }
}

/// A game in progress. Owns the only mutable board; searches work on copies.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    history: Vec<Turn>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Fresh game, Black to move
    pub fn new() -> Self {
        Self::from_position(Board::new(), Player::Black)
    }

    /// Resume from an arbitrary position
    pub fn from_position(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Legal moves for the side to move
    pub fn valid_moves(&self) -> Vec<Move> {
        self.board.valid_moves(self.to_move)
    }

    pub fn is_over(&self) -> bool {
        self.board.is_terminal()
    }

    /// Final result, `None` while the game is still going
    pub fn outcome(&self) -> Option<Outcome> {
        if self.is_over() {
            Some(self.board.winner())
        } else {
            None
        }
    }

    /// Play `square` for the side to move and hand the turn over.
    /// Returns the number of flipped discs.
    pub fn play(&mut self, square: Square) -> Result<usize, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let player = self.to_move;
        let flipped = self.board.try_apply(square, player)?;
        self.history.push(Turn::Play {
            player,
            square,
            flipped,
        });
        self.to_move = player.opponent();
        Ok(flipped)
    }

    /// Pass the turn; only allowed when the side to move has no legal move
    pub fn pass(&mut self) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.board.has_valid_move(self.to_move) {
            return Err(MoveError::PassNotAllowed);
        }
        self.history.push(Turn::Pass {
            player: self.to_move,
        });
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Pass automatically if the side to move is stuck. Returns true if a
    /// pass was recorded.
    pub fn advance(&mut self) -> bool {
        self.pass().is_ok()
    }

    /// Let `ai` choose and play for the side to move, passing when it has
    /// nothing to play
    pub fn play_ai(&mut self, ai: &mut MinimaxAI) -> Result<Turn, MoveError> {
        match ai.best_move(&self.board, self.to_move) {
            Some(mv) => {
                self.play(mv)?;
            }
            None => self.pass()?,
        }
        self.history.last().copied().ok_or(MoveError::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = GameSession::new();
        assert_eq!(session.to_move(), Player::Black);
        assert_eq!(session.score(), Score { black: 2, white: 2 });
        assert!(session.history().is_empty());
        assert_eq!(session.outcome(), None);
        assert_eq!(session.valid_moves().len(), 4);
    }

    #[test]
    fn test_play_switches_turn() {
        let mut session = GameSession::new();
        assert_eq!(session.play(Square::new(2, 3)), Ok(1));
        assert_eq!(session.to_move(), Player::White);
        assert_eq!(session.score(), Score { black: 4, white: 1 });
        assert_eq!(
            session.history(),
            &[Turn::Play {
                player: Player::Black,
                square: Square::new(2, 3),
                flipped: 1
            }]
        );
    }

    #[test]
    fn test_illegal_play_keeps_turn() {
        let mut session = GameSession::new();
        let before = session.board().clone();
        assert_eq!(
            session.play(Square::new(0, 0)),
            Err(MoveError::NoCaptures(Square::new(0, 0)))
        );
        assert_eq!(session.to_move(), Player::Black);
        assert_eq!(session.board(), &before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_pass_rules() {
        let mut session = GameSession::new();
        assert_eq!(session.pass(), Err(MoveError::PassNotAllowed));
        assert!(!session.advance());

        let board: Board = "
            B W . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
        "
        .parse()
        .unwrap();
        let mut session = GameSession::from_position(board, Player::White);
        assert!(session.advance());
        assert_eq!(session.to_move(), Player::Black);
        assert_eq!(session.history(), &[Turn::Pass { player: Player::White }]);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let board = Board::from_cells([[crate::game::Cell::Black; 8]; 8]);
        let mut session = GameSession::from_position(board, Player::White);
        assert!(session.is_over());
        assert_eq!(session.outcome(), Some(Outcome::Winner(Player::Black)));
        assert_eq!(session.pass(), Err(MoveError::GameOver));
        assert_eq!(session.play(Square::new(0, 0)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_ai_self_play_finishes() {
        let mut session = GameSession::new();
        let mut black = MinimaxAI::with_seed(1, 1);
        let mut white = MinimaxAI::with_seed(2, 2);

        let mut turns = 0;
        while !session.is_over() {
            let ai = match session.to_move() {
                Player::Black => &mut black,
                Player::White => &mut white,
            };
            let turn = session.play_ai(ai).unwrap();
            assert_eq!(turn.player().opponent(), session.to_move());
            turns += 1;
            assert!(turns <= 128, "game did not terminate");
        }

        let score = session.score();
        assert!(score.total() <= 64);
        let plays = session
            .history()
            .iter()
            .filter(|t| matches!(t, Turn::Play { .. }))
            .count();
        assert_eq!(score.total() as usize, 4 + plays);
        assert_eq!(session.outcome(), Some(session.board().winner()));
    }
}
