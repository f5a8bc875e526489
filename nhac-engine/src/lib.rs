//! Nhac Nhac engine: position evaluation, negamax search and the public
//! game interface built on top of `nhac-core`.
//!
//! The four operations a driver needs:
//!
//! ```
//! use nhac_engine::{apply_move, best_move, legal_moves, new_game, winner, Player};
//!
//! let board = new_game();
//! let moves = legal_moves(&board, Player::Orange);
//! let board = apply_move(&board, moves[0]).unwrap();
//! assert_eq!(winner(&board), None);
//! # let _ = best_move;
//! ```

pub mod config;
pub mod eval;
pub mod render;
pub mod search;
pub mod stats;

pub use nhac_core::{Board, Move, MoveError, MoveResult, Piece, Player, Pos, Size};

pub use config::{ConfigError, EngineConfig};
pub use eval::{evaluate, WIN_SCORE};
pub use search::{SearchConfig, SearchOutcome, Searcher};
pub use stats::SearchStats;

/// Starting position: empty grid, all twelve pieces off the board.
pub fn new_game() -> Board {
    Board::new()
}

/// Every legal move for `player`, in the order the search examines them.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    nhac_core::legal_moves(board, player)
}

/// Apply `mov` to `board`, rejecting moves that do not fit the position.
pub fn apply_move(board: &Board, mov: Move) -> MoveResult<Board> {
    board.apply(mov)
}

/// Owner of a completed line, if any.
pub fn winner(board: &Board) -> Option<Player> {
    board.winner()
}

/// Move chosen by a default-depth search, or `None` if `player` cannot move.
pub fn best_move(board: &Board, player: Player) -> Option<Move> {
    search::best_move(board, player)
}
