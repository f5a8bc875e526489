//! Squares, off-board pools and the board value built from them.

use serde::{Deserialize, Serialize};

use crate::error::{MoveError, MoveResult};
use crate::movegen;
use crate::{Move, Piece, Player, Pos, Size, LINES, PIECES_PER_SIZE};

/// One cell of the grid: a stack of at most three pieces.
///
/// Indexed by SIZE, not stack position. The covering rule makes the stack
/// strictly size-increasing, so slot order is bottom-to-top order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Square {
    slots: [Option<Player>; 3],
}

impl Square {
    pub const fn empty() -> Square {
        Square { slots: [None; 3] }
    }

    /// The visible piece, or `None` if the square is empty.
    #[inline]
    pub fn top(&self) -> Option<Piece> {
        self.pieces().last()
    }

    /// The piece directly beneath the visible one.
    pub fn beneath_top(&self) -> Option<Piece> {
        let mut stack = self.pieces().rev();
        stack.next()?;
        stack.next()
    }

    /// Pieces from bottom to top.
    pub fn pieces(&self) -> impl DoubleEndedIterator<Item = Piece> + '_ {
        Size::all().filter_map(move |size| {
            self.slots[size.index()].map(|owner| Piece::new(owner, size))
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Check if a piece of the given size may land here.
    #[inline]
    pub fn can_accept(&self, size: Size) -> bool {
        match self.top() {
            None => true,
            Some(top) => size.can_cover(top.size),
        }
    }

    /// Push a piece on top. Does NOT validate - caller checks `can_accept`.
    #[inline]
    pub(crate) fn push(&mut self, piece: Piece) {
        debug_assert!(self.can_accept(piece.size), "covering rule violated");
        self.slots[piece.size.index()] = Some(piece.owner);
    }

    /// Remove and return the visible piece.
    pub(crate) fn pop(&mut self) -> Option<Piece> {
        let top = self.top()?;
        self.slots[top.size.index()] = None;
        Some(top)
    }

    fn count(&self, piece: Piece) -> u8 {
        u8::from(self.slots[piece.size.index()] == Some(piece.owner))
    }
}

/// A player's pieces that have not been placed yet.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Pool {
    counts: [u8; 3],
}

impl Pool {
    /// Two pieces of every size.
    pub const fn full() -> Pool {
        Pool {
            counts: [PIECES_PER_SIZE; 3],
        }
    }

    #[inline]
    pub fn count(&self, size: Size) -> u8 {
        self.counts[size.index()]
    }

    #[inline]
    pub fn has(&self, size: Size) -> bool {
        self.count(size) > 0
    }

    /// Distinct sizes still held, smallest first.
    pub fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        Size::all().filter(move |&size| self.has(size))
    }

    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    /// Remove one piece of `size`. Returns false if none was left.
    pub(crate) fn take(&mut self, size: Size) -> bool {
        let slot = &mut self.counts[size.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::full()
    }
}

/// Complete game position: the 3x3 grid plus both off-board pools.
///
/// Boards are values. Every operation that changes the position returns a
/// new board; nothing mutates a board once it has been handed out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
    pools: [Pool; 2],
}

impl Board {
    /// Create the starting position: empty grid, every piece off the board.
    pub fn new() -> Board {
        Board {
            squares: [Square::empty(); 9],
            pools: [Pool::full(); 2],
        }
    }

    #[inline]
    pub fn square(&self, pos: Pos) -> &Square {
        &self.squares[pos.idx()]
    }

    #[inline]
    pub fn pool(&self, player: Player) -> &Pool {
        &self.pools[player.index()]
    }

    /// Get the top (visible) piece at a position.
    #[inline]
    pub fn top(&self, pos: Pos) -> Option<Piece> {
        self.square(pos).top()
    }

    /// Same as [`Board::top`], addressed by row and column.
    pub fn top_at(&self, row: u8, col: u8) -> Option<Piece> {
        self.top(Pos::from_row_col(row, col))
    }

    /// Check if a piece of the given size can land on this position.
    #[inline]
    pub fn can_place(&self, size: Size, pos: Pos) -> bool {
        self.square(pos).can_accept(size)
    }

    // ========== Applying Moves ==========

    /// Apply a move, returning the resulting board.
    ///
    /// The receiver is left untouched. Moves that do not fit this board are
    /// rejected instead of corrupting a stack or a pool.
    pub fn apply(&self, mov: Move) -> MoveResult<Board> {
        let to = mov.to();
        check_pos(to)?;
        let piece = mov.piece();

        match mov {
            Move::Place { .. } => {
                if !self.pool(piece.owner).has(piece.size) {
                    return Err(MoveError::PieceUnavailable {
                        player: piece.owner,
                        size: piece.size,
                    });
                }
            }
            Move::Relocate { from, .. } => {
                check_pos(from)?;
                if from == to {
                    return Err(MoveError::SameSquare { pos: from.0 });
                }
                let found = self.top(from);
                if found != Some(piece) {
                    return Err(MoveError::NotOwnTopPiece {
                        pos: from.0,
                        expected: piece,
                        found,
                    });
                }
            }
        }

        if let Some(top) = self.top(to) {
            if !piece.can_cover(top) {
                return Err(MoveError::Covered {
                    pos: to.0,
                    size: piece.size,
                    top,
                });
            }
        }

        Ok(self.apply_unchecked(mov))
    }

    /// Apply a move known to come from [`movegen::legal_moves`] for this board.
    ///
    /// Skips validation; only debug builds assert the covering rule.
    pub fn apply_unchecked(&self, mov: Move) -> Board {
        let mut next = *self;
        match mov {
            Move::Place { piece, to } => {
                let taken = next.pools[piece.owner.index()].take(piece.size);
                debug_assert!(taken, "placed a piece that was not in the pool");
                next.squares[to.idx()].push(piece);
            }
            Move::Relocate { from, to, .. } => {
                if let Some(lifted) = next.squares[from.idx()].pop() {
                    next.squares[to.idx()].push(lifted);
                }
            }
        }
        next
    }

    /// Copy of this board with the top of `pos` lifted off and held in the air.
    ///
    /// Used to look at what a square would show if its top piece moved away.
    /// The lifted piece is not put anywhere, so the copy is a scratch value and
    /// not a reachable position.
    pub fn revealed(&self, pos: Pos) -> Board {
        let mut scratch = *self;
        scratch.squares[pos.idx()].pop();
        scratch
    }

    /// Generate all legal moves for `player`. See [`movegen::legal_moves`].
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        movegen::legal_moves(self, player)
    }

    // ========== Lines & Win Detection ==========

    /// Count visible pieces on a line: `(player's, opponent's)`.
    pub fn line_counts(&self, line: &[Pos; 3], player: Player) -> (u8, u8) {
        line.iter()
            .filter_map(|&pos| self.top(pos))
            .fold((0, 0), |(own, opp), piece| {
                if piece.owner == player {
                    (own + 1, opp)
                } else {
                    (own, opp + 1)
                }
            })
    }

    /// Get the first line (in [`LINES`] order) showing three of `player`'s pieces.
    pub fn winning_line(&self, player: Player) -> Option<[Pos; 3]> {
        LINES
            .iter()
            .find(|line| self.line_counts(line, player).0 == 3)
            .copied()
    }

    /// Check if the given player has won (3 in a row visible on top).
    pub fn has_won(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// Owner of the first complete line, scanning rows, columns, then diagonals.
    ///
    /// A legal game cannot show complete lines for both players at once. If a
    /// constructed board did, the owner of the earliest line in scan order is
    /// reported.
    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let first = self.top(line[0])?;
            line[1..]
                .iter()
                .all(|&pos| self.top(pos).map(|p| p.owner) == Some(first.owner))
                .then_some(first.owner)
        })
    }

    /// Number of lines where `player` shows two pieces and the opponent none.
    pub fn open_twos(&self, player: Player) -> usize {
        LINES
            .iter()
            .filter(|line| self.line_counts(line, player) == (2, 0))
            .count()
    }

    // ========== Invariants ==========

    /// How many copies of `piece` sit on the grid, hidden or visible.
    pub fn on_board_count(&self, piece: Piece) -> u8 {
        self.squares.iter().map(|sq| sq.count(piece)).sum()
    }

    /// On-board plus off-board copies of `piece`. Always 2 for reachable boards.
    pub fn total_count(&self, piece: Piece) -> u8 {
        self.on_board_count(piece) + self.pool(piece.owner).count(piece.size)
    }

    /// Check piece conservation and the strictly increasing stack order.
    pub fn is_well_formed(&self) -> bool {
        let conserved = Player::all().all(|owner| {
            Size::all().all(|size| self.total_count(Piece::new(owner, size)) == PIECES_PER_SIZE)
        });
        let stacked = self.squares.iter().all(|sq| {
            let sizes: Vec<Size> = sq.pieces().map(|p| p.size).collect();
            sizes.windows(2).all(|w| w[1].can_cover(w[0]))
        });
        conserved && stacked
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn check_pos(pos: Pos) -> MoveResult<()> {
    if pos.is_valid() {
        Ok(())
    } else {
        Err(MoveError::InvalidPos { pos: pos.0 })
    }
}
