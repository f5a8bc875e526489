//! Nhac Nhac game state: pieces, stacked squares, boards and move generation.
//!
//! # Board Layout
//!
//! ```text
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! # Stacks
//!
//! A piece may only land on an empty square or on a strictly smaller top
//! piece, so every stack holds at most one piece of each size and is strictly
//! size-increasing from bottom to top. [`Square`] stores one owner slot per
//! size; the stacking order is the size order.
//!
//! # Values, not mutation
//!
//! [`Board`] is `Copy`. Applying a move returns a new board and leaves the
//! original untouched, so a search tree is just a tree of plain values.

pub mod board;
pub mod error;
pub mod movegen;

use serde::{Deserialize, Serialize};

pub use board::{Board, Pool, Square};
pub use error::{MoveError, MoveResult};
pub use movegen::{is_legal, legal_moves};

/// Number of pieces of each size a player starts with.
pub const PIECES_PER_SIZE: u8 = 2;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Orange,
    Blue,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Orange => Player::Blue,
            Player::Blue => Player::Orange,
        }
    }

    /// Index into per-player tables (Orange = 0, Blue = 1).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Orange => 0,
            Player::Blue => 1,
        }
    }

    pub fn all() -> impl Iterator<Item = Player> {
        [Player::Orange, Player::Blue].into_iter()
    }
}

/// Piece size. The derived ordering is the covering order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    /// Check if this size can cover (sit on top of) another size.
    #[inline]
    pub fn can_cover(self, other: Size) -> bool {
        self > other
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Size::Small => 0,
            Size::Medium => 1,
            Size::Large => 2,
        }
    }

    /// Convert from index (0, 1, 2) to Size.
    #[inline]
    pub fn from_index(idx: usize) -> Option<Size> {
        match idx {
            0 => Some(Size::Small),
            1 => Some(Size::Medium),
            2 => Some(Size::Large),
            _ => None,
        }
    }

    /// Material weight of a visible piece of this size.
    #[inline]
    pub fn power(self) -> i32 {
        match self {
            Size::Small => 1,
            Size::Medium => 4,
            Size::Large => 9,
        }
    }

    /// All sizes, smallest first.
    pub fn all() -> impl DoubleEndedIterator<Item = Size> {
        [Size::Small, Size::Medium, Size::Large].into_iter()
    }
}

/// A single piece. Pieces with the same owner and size are interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Player,
    pub size: Size,
}

impl Piece {
    #[inline]
    pub const fn new(owner: Player, size: Size) -> Piece {
        Piece { owner, size }
    }

    /// Check if this piece may be pushed on top of `other`.
    #[inline]
    pub fn can_cover(self, other: Piece) -> bool {
        self.size.can_cover(other.size)
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    pub const CENTER: Pos = Pos(4);
    pub const CORNERS: [Pos; 4] = [Pos(0), Pos(2), Pos(6), Pos(8)];

    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all 9 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// The 8 lines in scan order: rows 0-2, columns 0-2, main diagonal, anti-diagonal.
pub const LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)],
    [Pos(3), Pos(4), Pos(5)],
    [Pos(6), Pos(7), Pos(8)],
    [Pos(0), Pos(3), Pos(6)],
    [Pos(1), Pos(4), Pos(7)],
    [Pos(2), Pos(5), Pos(8)],
    [Pos(0), Pos(4), Pos(8)],
    [Pos(2), Pos(4), Pos(6)],
];

/// A move in the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Move {
    /// Place a piece from the off-board pool onto the board.
    Place { piece: Piece, to: Pos },
    /// Lift the mover's own top piece and put it on another square.
    Relocate { piece: Piece, from: Pos, to: Pos },
}

impl Move {
    #[inline]
    pub fn place(owner: Player, size: Size, to: Pos) -> Move {
        Move::Place {
            piece: Piece::new(owner, size),
            to,
        }
    }

    #[inline]
    pub fn relocate(piece: Piece, from: Pos, to: Pos) -> Move {
        Move::Relocate { piece, from, to }
    }

    /// Get the destination position of the move.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Move::Place { to, .. } | Move::Relocate { to, .. } => *to,
        }
    }

    /// Source square for relocations, `None` for placements.
    #[inline]
    pub fn source(&self) -> Option<Pos> {
        match self {
            Move::Place { .. } => None,
            Move::Relocate { from, .. } => Some(*from),
        }
    }

    /// The piece that ends up on top of the destination.
    #[inline]
    pub fn piece(&self) -> Piece {
        match self {
            Move::Place { piece, .. } | Move::Relocate { piece, .. } => *piece,
        }
    }

    /// The player making the move.
    #[inline]
    pub fn player(&self) -> Player {
        self.piece().owner
    }

    #[inline]
    pub fn is_place(&self) -> bool {
        matches!(self, Move::Place { .. })
    }
}
