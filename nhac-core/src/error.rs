//! Errors raised when a move is applied to a board it does not fit.

use thiserror::Error;

use crate::{Piece, Player, Size};

/// A move rejected by [`Board::apply`](crate::Board::apply).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Cell index outside 0-8
    #[error("invalid position {pos} (must be 0-8)")]
    InvalidPos { pos: u8 },

    /// Relocation onto its own source square
    #[error("cannot relocate a piece onto its own square {pos}")]
    SameSquare { pos: u8 },

    /// The mover has no piece of that size left off the board
    #[error("{player:?} has no {size:?} piece off the board")]
    PieceUnavailable { player: Player, size: Size },

    /// The source top piece is not the one the move claims to lift
    #[error("top of square {pos} is {found:?}, expected {expected:?}")]
    NotOwnTopPiece {
        pos: u8,
        expected: Piece,
        found: Option<Piece>,
    },

    /// Target top piece is as large as or larger than the incoming piece
    #[error("{size:?} cannot cover {top:?} on square {pos}")]
    Covered { pos: u8, size: Size, top: Piece },
}

/// Result type alias for board operations
pub type MoveResult<T> = Result<T, MoveError>;
