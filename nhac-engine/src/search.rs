//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Candidates are searched in generator order and a later move only replaces
//! the current best on a strictly higher score, so the first move reaching the
//! maximum wins ties. No move ordering, transposition table or iterative
//! deepening: the same board, player and depth always give the same move.

use std::time::Instant;

use nhac_core::{legal_moves, Board, Move, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::eval::evaluate;
use crate::stats::SearchStats;

/// Lookahead used when nothing else is configured.
pub const DEFAULT_DEPTH: u8 = 5;

/// Deepest lookahead accepted by configuration.
pub const MAX_DEPTH: u8 = 9;

/// Window bound. `-INF` is still representable, so negation never overflows.
pub const INF: i32 = i32::MAX;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies to look ahead. Zero means the search never proposes a move.
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self { depth }
    }
}

/// Result of a root search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Chosen move, `None` if the root was decided or had no legal move
    pub best_move: Option<Move>,
    /// Negamax score of the root from the searching player's side
    pub score: i32,
    pub stats: SearchStats,
}

/// Negamax searcher. Holds the configuration and the last search's counters.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            stats: SearchStats::new(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Counters from the most recent search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Choose a move for `player`, or `None` if there is nothing to play.
    pub fn best_move(&mut self, board: &Board, player: Player) -> Option<Move> {
        self.search(board, player).best_move
    }

    /// Search `board` for `player` to the configured depth.
    #[instrument(skip_all, fields(player = ?player, depth = self.config.depth))]
    pub fn search(&mut self, board: &Board, player: Player) -> SearchOutcome {
        self.stats = SearchStats::new();
        let start = Instant::now();

        let (score, best_move) = self.negamax(board, self.config.depth, -INF, INF, player, player);

        self.stats.elapsed = start.elapsed();
        match best_move {
            Some(mov) => info!(?mov, score, "best move chosen"),
            None => info!(score, "no move available"),
        }
        self.stats.log_summary();

        SearchOutcome {
            best_move,
            score,
            stats: self.stats.clone(),
        }
    }

    /// Returns the score from `mover`'s side and the best move at this node.
    fn negamax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        mover: Player,
        perspective: Player,
    ) -> (i32, Option<Move>) {
        self.stats.nodes += 1;
        let is_root = depth == self.config.depth;

        if depth == 0 || board.winner().is_some() {
            return (self.leaf(board, mover, perspective), None);
        }

        let moves = legal_moves(board, mover);
        if moves.is_empty() {
            self.stats.stalemates += 1;
            return (self.leaf(board, mover, perspective), None);
        }

        let mut best_score = -INF;
        let mut best_move = None;

        for (idx, &mov) in moves.iter().enumerate() {
            let child = board.apply_unchecked(mov);
            let (child_score, _) =
                self.negamax(&child, depth - 1, -beta, -alpha, mover.opponent(), perspective);
            let score = -child_score;

            if is_root {
                debug!(?mov, score, "root candidate");
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }

            alpha = alpha.max(best_score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                self.stats.moves_pruned += (moves.len() - idx - 1) as u64;
                break;
            }
        }

        (best_score, best_move)
    }

    /// Static score of `board` seen from `mover`'s side.
    fn leaf(&mut self, board: &Board, mover: Player, perspective: Player) -> i32 {
        self.stats.leaves += 1;
        if board.winner().is_some() {
            self.stats.terminal_leaves += 1;
        }
        let score = evaluate(board, perspective);
        if mover == perspective {
            score
        } else {
            -score
        }
    }
}

/// Search with the default configuration.
pub fn best_move(board: &Board, player: Player) -> Option<Move> {
    Searcher::new(SearchConfig::default()).best_move(board, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::WIN_SCORE;
    use nhac_core::{Pos, Size};

    fn play(moves: &[(Player, Size, u8)]) -> Board {
        moves.iter().fold(Board::new(), |board, &(owner, size, pos)| {
            board.apply(Move::place(owner, size, Pos(pos))).unwrap()
        })
    }

    fn searcher(depth: u8) -> Searcher {
        Searcher::new(SearchConfig::with_depth(depth))
    }

    #[test]
    fn test_depth_one_takes_immediate_win() {
        let board = play(&[
            (Player::Orange, Size::Large, 0),
            (Player::Orange, Size::Large, 1),
        ]);
        let outcome = searcher(1).search(&board, Player::Orange);
        assert_eq!(outcome.score, WIN_SCORE);
        // Small at (0,2) is the first winning move in generator order.
        assert_eq!(
            outcome.best_move,
            Some(Move::place(Player::Orange, Size::Small, Pos(2)))
        );
    }

    #[test]
    fn test_depth_two_blocks_threat() {
        // Blue threatens row 2; every Orange move that leaves (2,2) open loses.
        let board = play(&[
            (Player::Blue, Size::Large, 6),
            (Player::Blue, Size::Large, 7),
            (Player::Orange, Size::Small, 0),
        ]);
        let mov = searcher(2).best_move(&board, Player::Orange).unwrap();
        let next = board.apply(mov).unwrap();
        assert_eq!(next.top(Pos(8)).map(|p| p.owner), Some(Player::Orange));
    }

    #[test]
    fn test_decided_root_has_no_move() {
        let board = play(&[
            (Player::Blue, Size::Small, 2),
            (Player::Blue, Size::Small, 4),
            (Player::Blue, Size::Medium, 6),
        ]);
        let outcome = searcher(3).search(&board, Player::Orange);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, -WIN_SCORE);
        assert_eq!(outcome.stats.nodes, 1);
        assert_eq!(outcome.stats.terminal_leaves, 1);
    }

    #[test]
    fn test_depth_zero_returns_static_score() {
        let board = play(&[(Player::Orange, Size::Large, 4)]);
        let outcome = searcher(0).search(&board, Player::Blue);
        assert_eq!(outcome.best_move, None);
        assert_eq!(outcome.score, evaluate(&board, Player::Blue));
    }

    #[test]
    fn test_search_deterministic() {
        let board = play(&[
            (Player::Orange, Size::Medium, 4),
            (Player::Blue, Size::Large, 4),
        ]);
        let a = searcher(3).search(&board, Player::Orange);
        let b = searcher(3).search(&board, Player::Orange);
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
        assert_eq!(a.stats.nodes, b.stats.nodes);
    }

    #[test]
    fn test_pruning_matches_full_minimax() {
        // Plain minimax over the same tree must agree on the root score.
        fn minimax(board: &Board, depth: u8, mover: Player, perspective: Player) -> i32 {
            if depth == 0 || board.winner().is_some() {
                let s = evaluate(board, perspective);
                return if mover == perspective { s } else { -s };
            }
            let moves = legal_moves(board, mover);
            if moves.is_empty() {
                let s = evaluate(board, perspective);
                return if mover == perspective { s } else { -s };
            }
            moves
                .iter()
                .map(|&m| -minimax(&board.apply_unchecked(m), depth - 1, mover.opponent(), perspective))
                .max()
                .unwrap()
        }

        let board = play(&[
            (Player::Orange, Size::Large, 4),
            (Player::Blue, Size::Medium, 0),
            (Player::Orange, Size::Small, 8),
        ]);
        let outcome = searcher(2).search(&board, Player::Blue);
        assert_eq!(outcome.score, minimax(&board, 2, Player::Blue, Player::Blue));
        assert!(outcome.stats.cutoffs > 0);
    }

    #[test]
    fn test_stats_track_last_search() {
        let mut s = searcher(2);
        s.search(&Board::new(), Player::Orange);
        let first = s.stats().nodes;
        assert!(first > 27);
        s.search(&play(&[(Player::Orange, Size::Large, 4)]), Player::Blue);
        assert_ne!(s.stats().nodes, 0);
        assert!(s.stats().leaves <= s.stats().nodes);
    }
}
