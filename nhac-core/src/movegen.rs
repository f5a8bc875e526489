//! Legal move generation.
//!
//! Moves come out in a fixed order, which the search relies on for
//! reproducible tie-breaks:
//! 1. Placements, one family per distinct size still off the board
//!    (Small → Medium → Large), each family scanning cells 0-8
//! 2. Relocations, by source cell 0-8, then target cell 0-8

use crate::{Board, Move, Player, Pos};

/// Upper bound on moves in any position: 3 sizes × 9 cells + 9 sources × 8 targets.
pub const MAX_MOVES: usize = 3 * 9 + 9 * 8;

/// Generate all legal moves for `player`.
///
/// Returns an empty list if the player cannot move.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::with_capacity(32);
    push_placements(board, player, &mut moves);
    push_relocations(board, player, &mut moves);
    moves
}

/// Check if `mov` is one of the moves [`legal_moves`] would produce.
pub fn is_legal(board: &Board, mov: &Move) -> bool {
    legal_moves(board, mov.player()).contains(mov)
}

fn push_placements(board: &Board, player: Player, moves: &mut Vec<Move>) {
    // Two pieces of one size are interchangeable, so each size yields one family.
    for size in board.pool(player).sizes() {
        for to in Pos::all() {
            if board.can_place(size, to) {
                moves.push(Move::place(player, size, to));
            }
        }
    }
}

fn push_relocations(board: &Board, player: Player, moves: &mut Vec<Move>) {
    for from in Pos::all() {
        let Some(piece) = board.top(from).filter(|p| p.owner == player) else {
            continue;
        };
        for to in Pos::all() {
            if to != from && board.can_place(piece.size, to) {
                moves.push(Move::relocate(piece, from, to));
            }
        }
    }
}
