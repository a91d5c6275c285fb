//! Depth-limited minimax AI with alpha-beta pruning

use crate::board::Square;
use crate::eval::evaluate;
use crate::game::{Board, Move, Player};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default search depth in plies
pub const DEFAULT_DEPTH: u32 = 4;

/// Bounds of the initial alpha-beta window
const NEG_INF: i32 = i32::MIN;
const POS_INF: i32 = i32::MAX;

// ============================================================================
// MINIMAX AI
// ============================================================================

/// Result of a root search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub best_move: Move,
    /// Minimax value of `best_move`, signed for the searching player
    pub score: i32,
    /// Tree nodes visited
    pub nodes: u64,
}

/// Minimax AI player
pub struct MinimaxAI {
    pub depth: u32,
    pub pruning: bool,
    rng: ChaCha8Rng,
    nodes_evaluated: u64,
}

impl MinimaxAI {
    /// AI with an entropy-seeded move-ordering source
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            pruning: true,
            rng: ChaCha8Rng::from_entropy(),
            nodes_evaluated: 0,
        }
    }

    /// AI with a fixed seed, for reproducible games
    pub fn with_seed(depth: u32, seed: u64) -> Self {
        Self {
            depth,
            pruning: true,
            rng: ChaCha8Rng::seed_from_u64(seed),
            nodes_evaluated: 0,
        }
    }

    /// Enable or disable alpha-beta cutoffs (the result is the same either way)
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Nodes visited during the most recent search
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    /// Best move for `player` at the configured depth, `None` if `player`
    /// has no legal move
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.search(board, player, self.depth).map(|r| r.best_move)
    }

    /// Search at an explicit depth and report the score as well
    pub fn search(&mut self, board: &Board, player: Player, depth: u32) -> Option<SearchResult> {
        self.nodes_evaluated = 0;
        let result = search_root(board, player, depth, self.pruning, &mut self.rng);
        if let Some(r) = &result {
            self.nodes_evaluated = r.nodes;
        }
        result
    }

    /// Evaluate a position from `player`'s perspective
    pub fn evaluate(&self, board: &Board, player: Player) -> i32 {
        evaluate(board, player)
    }
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

/// One-shot search without holding an engine instance
pub fn best_move<R: Rng + ?Sized>(board: &Board, player: Player, depth: u32, rng: &mut R) -> Option<Move> {
    search_root(board, player, depth, true, rng).map(|r| r.best_move)
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Per-search state threaded through the recursion
struct SearchContext<'a, R: ?Sized> {
    root: Player,
    pruning: bool,
    rng: &'a mut R,
    nodes: u64,
}

fn search_root<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    depth: u32,
    pruning: bool,
    rng: &mut R,
) -> Option<SearchResult> {
    let mut moves = board.valid_moves(player);
    if moves.is_empty() {
        return None;
    }

    // Depth 0 would never look at a move
    let depth = depth.max(1);

    let mut ctx = SearchContext {
        root: player,
        pruning,
        rng,
        nodes: 1,
    };

    // Shuffle so that ties are broken differently from call to call
    moves.shuffle(&mut *ctx.rng);

    let mut best_move = moves[0];
    let mut best_score = NEG_INF;
    let mut alpha = NEG_INF;

    for mv in moves {
        let child = child_board(board, mv, player);
        let score = minimax(&child, depth - 1, alpha, POS_INF, false, &mut ctx);

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        alpha = alpha.max(score);
    }

    tracing::debug!(
        player = %player,
        depth,
        nodes = ctx.nodes,
        score = best_score,
        "best move {}",
        best_move
    );

    Some(SearchResult {
        best_move,
        score: best_score,
        nodes: ctx.nodes,
    })
}

fn child_board(board: &Board, mv: Square, player: Player) -> Board {
    let mut child = board.clone();
    let applied = child.apply(mv, player);
    debug_assert!(applied, "generated move {} was rejected", mv);
    child
}

/// Minimax value of `board`, always signed for `ctx.root`.
///
/// `maximizing` is true when the root player is to move.
fn minimax<R: Rng + ?Sized>(
    board: &Board,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    ctx: &mut SearchContext<'_, R>,
) -> i32 {
    ctx.nodes += 1;

    if depth == 0 || board.is_terminal() {
        return evaluate(board, ctx.root);
    }

    let to_move = if maximizing {
        ctx.root
    } else {
        ctx.root.opponent()
    };

    let mut moves = board.valid_moves(to_move);

    // Forced pass: same position, other side to move, one ply used up
    if moves.is_empty() {
        return minimax(board, depth - 1, alpha, beta, !maximizing, ctx);
    }

    moves.shuffle(&mut *ctx.rng);

    if maximizing {
        let mut best = NEG_INF;
        for mv in moves {
            let child = child_board(board, mv, to_move);
            let score = minimax(&child, depth - 1, alpha, beta, false, ctx);
            best = best.max(score);
            alpha = alpha.max(score);
            if ctx.pruning && beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = POS_INF;
        for mv in moves {
            let child = child_board(board, mv, to_move);
            let score = minimax(&child, depth - 1, alpha, beta, true, ctx);
            best = best.min(score);
            beta = beta.min(score);
            if ctx.pruning && beta <= alpha {
                break;
            }
        }
        best
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax with no pruning and fixed move order
    fn reference_minimax(board: &Board, depth: u32, maximizing: bool, root: Player) -> i32 {
        if depth == 0 || board.is_terminal() {
            return evaluate(board, root);
        }
        let to_move = if maximizing { root } else { root.opponent() };
        let moves = board.valid_moves(to_move);
        if moves.is_empty() {
            return reference_minimax(board, depth - 1, !maximizing, root);
        }
        let scores = moves.into_iter().map(|mv| {
            let mut child = board.clone();
            child.apply(mv, to_move);
            reference_minimax(&child, depth - 1, !maximizing, root)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn reference_root(board: &Board, player: Player, depth: u32) -> i32 {
        board
            .valid_moves(player)
            .into_iter()
            .map(|mv| {
                let mut child = board.clone();
                child.apply(mv, player);
                reference_minimax(&child, depth - 1, false, player)
            })
            .max()
            .unwrap()
    }

    /// Positions reached by seeded random play from the start
    fn sample_positions(seed: u64, plies: usize) -> Vec<(Board, Player)> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut player = Player::Black;
        let mut positions = Vec::new();
        for _ in 0..plies {
            if board.is_terminal() {
                break;
            }
            let moves = board.valid_moves(player);
            if let Some(&mv) = moves.choose(&mut rng) {
                positions.push((board.clone(), player));
                board.apply(mv, player);
            }
            player = player.opponent();
        }
        positions
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_ai_returns_legal_move() {
        let b = Board::new();
        let mut ai = MinimaxAI::with_seed(3, 7);
        let mv = ai.best_move(&b, Player::Black).unwrap();
        assert!(b.is_valid(mv, Player::Black));
        assert!(ai.nodes_evaluated() > 0);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let b = board(
            "
            B W . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            ",
        );
        let mut ai = MinimaxAI::with_seed(4, 1);
        assert_eq!(ai.best_move(&b, Player::White), None);
        assert_eq!(ai.nodes_evaluated(), 0);
        assert!(ai.best_move(&b, Player::Black).is_some());

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(best_move(&b, Player::White, 3, &mut rng), None);
    }

    #[test]
    fn test_terminal_board_returns_none() {
        let full = Board::from_cells([[crate::game::Cell::White; 8]; 8]);
        let mut ai = MinimaxAI::with_seed(2, 0);
        assert_eq!(ai.best_move(&full, Player::Black), None);
        assert_eq!(ai.best_move(&full, Player::White), None);
    }

    #[test]
    fn test_matches_reference_minimax() {
        for (b, player) in sample_positions(11, 40).into_iter().step_by(5) {
            for depth in 1..=3 {
                let mut ai = MinimaxAI::with_seed(depth, 99);
                let result = ai.search(&b, player, depth).unwrap();
                assert_eq!(result.score, reference_root(&b, player, depth), "depth {}", depth);
            }
        }
    }

    #[test]
    fn test_pruning_preserves_score() {
        for (b, player) in sample_positions(2024, 50).into_iter().step_by(7) {
            for depth in 1..=4 {
                let mut pruned = MinimaxAI::with_seed(depth, 5);
                let mut full = MinimaxAI::with_seed(depth, 5).with_pruning(false);

                let a = pruned.search(&b, player, depth).unwrap();
                let f = full.search(&b, player, depth).unwrap();

                assert_eq!(a.score, f.score, "depth {} on\n{}", depth, b);
                assert!(a.nodes <= f.nodes);
            }
        }
    }

    #[test]
    fn test_depth_one_picks_best_child() {
        for (b, player) in sample_positions(8, 30).into_iter().step_by(3) {
            let mut ai = MinimaxAI::with_seed(1, 17);
            let result = ai.search(&b, player, 1).unwrap();

            let best_eval = b
                .valid_moves(player)
                .into_iter()
                .map(|mv| {
                    let mut child = b.clone();
                    child.apply(mv, player);
                    evaluate(&child, player)
                })
                .max()
                .unwrap();

            let mut chosen = b.clone();
            assert!(chosen.apply(result.best_move, player));
            assert_eq!(result.score, best_eval);
            assert_eq!(evaluate(&chosen, player), best_eval);
            // Root plus one leaf per move
            assert_eq!(result.nodes, 1 + b.valid_moves(player).len() as u64);
        }
    }

    #[test]
    fn test_forced_pass_is_searched() {
        // After Black takes (0,2) White has no reply but Black can still move
        let b = board(
            "
            B W . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            . . . . . . . .
            ",
        );
        let mut ai = MinimaxAI::with_seed(3, 4);
        let result = ai.search(&b, Player::Black, 3).unwrap();
        assert_eq!(result.best_move, Square::new(0, 2));
        assert_eq!(result.score, reference_root(&b, Player::Black, 3));
    }

    #[test]
    fn test_same_seed_same_move() {
        for (b, player) in sample_positions(77, 30).into_iter().step_by(6) {
            let mut first = MinimaxAI::with_seed(3, 1234);
            let mut second = MinimaxAI::with_seed(3, 1234);
            assert_eq!(first.best_move(&b, player), second.best_move(&b, player));
            assert_eq!(first.nodes_evaluated(), second.nodes_evaluated());
        }
    }

    #[test]
    fn test_tied_moves_are_all_reachable() {
        // All four openings are symmetric, so every one of them is optimal
        let b = Board::new();
        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            let mut ai = MinimaxAI::with_seed(2, seed);
            let mv = ai.best_move(&b, Player::Black).unwrap();
            assert!(b.is_valid(mv, Player::Black));
            seen.insert(mv);
        }
        assert!(seen.len() > 1, "tie-breaking never varied: {:?}", seen);
    }

    #[test]
    fn test_nodes_reset_between_calls() {
        let b = Board::new();
        let mut ai = MinimaxAI::with_seed(3, 9);
        ai.best_move(&b, Player::Black);
        let deep = ai.nodes_evaluated();
        ai.search(&b, Player::Black, 1);
        assert_eq!(ai.nodes_evaluated(), 5);
        assert!(deep > 5);
    }

    #[test]
    fn test_depth_zero_searches_one_ply() {
        let b = Board::new();
        let mut ai = MinimaxAI::with_seed(0, 3);
        let result = ai.search(&b, Player::Black, 0).unwrap();
        assert_eq!(result.nodes, 5);
        assert!(b.is_valid(result.best_move, Player::Black));
    }

    #[test]
    fn test_search_does_not_mutate_board() {
        let b = Board::new();
        let before = b.clone();
        let mut ai = MinimaxAI::with_seed(4, 10);
        ai.best_move(&b, Player::Black);
        assert_eq!(b, before);
    }
}
