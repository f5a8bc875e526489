//! Static position evaluation.
//!
//! Scores a board from one player's point of view as the sum of four terms:
//! - Line potential (open one- and two-in-a-rows)
//! - Positional control (center and corners)
//! - Material power (size of every visible piece)
//! - Hidden state (opponent pieces buried under the player's tops)
//!
//! The first three are antisymmetric. The hidden-state term only looks at
//! stacks topped by `perspective`, so `evaluate(b, p) != -evaluate(b, p.opponent())`
//! in general; the search accounts for this by always evaluating from the
//! root player's perspective.

use nhac_core::{Board, Player, Pos, LINES};

/// Score of a decided game.
pub const WIN_SCORE: i32 = 10_000;
pub const TWO_IN_A_ROW_SCORE: i32 = 100;
pub const ONE_IN_A_ROW_SCORE: i32 = 10;
pub const CENTER_CONTROL_SCORE: i32 = 25;
pub const CORNER_CONTROL_SCORE: i32 = 15;
/// Bonus for covering an opponent piece, which then cannot move.
pub const TRAPPED_PIECE_BONUS: i32 = 20;
/// Applied once when uncovering a trapped piece would give the opponent an open two.
pub const REVEAL_THREAT_PENALTY: i32 = -200;
/// Applied when uncovering a trapped piece would complete an opponent line.
pub const REVEAL_LOSS_PENALTY: i32 = REVEAL_THREAT_PENALTY * 10;

/// Evaluate `board` for `perspective`. Higher is better.
///
/// Decided boards score exactly `WIN_SCORE` or `-WIN_SCORE`.
pub fn evaluate(board: &Board, perspective: Player) -> i32 {
    if let Some(winner) = board.winner() {
        return if winner == perspective {
            WIN_SCORE
        } else {
            -WIN_SCORE
        };
    }

    line_potential(board, perspective)
        + positional_control(board, perspective)
        + material_power(board, perspective)
        + hidden_state(board, perspective)
}

/// Uncontested lines: +100 for two visible pieces, +10 for one; mirrored for the opponent.
pub fn line_potential(board: &Board, perspective: Player) -> i32 {
    LINES
        .iter()
        .map(|line| match board.line_counts(line, perspective) {
            (2, 0) => TWO_IN_A_ROW_SCORE,
            (1, 0) => ONE_IN_A_ROW_SCORE,
            (0, 2) => -TWO_IN_A_ROW_SCORE,
            (0, 1) => -ONE_IN_A_ROW_SCORE,
            _ => 0,
        })
        .sum()
}

/// Center and corner ownership by visible top piece.
pub fn positional_control(board: &Board, perspective: Player) -> i32 {
    let center = signed(board, Pos::CENTER, perspective, CENTER_CONTROL_SCORE);
    let corners: i32 = Pos::CORNERS
        .iter()
        .map(|&pos| signed(board, pos, perspective, CORNER_CONTROL_SCORE))
        .sum();
    center + corners
}

/// Size weight of every visible piece.
pub fn material_power(board: &Board, perspective: Player) -> i32 {
    Pos::all()
        .filter_map(|pos| board.top(pos))
        .map(|piece| {
            if piece.owner == perspective {
                piece.size.power()
            } else {
                -piece.size.power()
            }
        })
        .sum()
}

/// Reward for trapping opponent pieces, minus the risk of ever uncovering them.
///
/// For each square where `perspective` sits directly on an opponent piece the
/// trap bonus always applies. The uncovering is then simulated on a scratch
/// copy: a completed opponent line costs `REVEAL_LOSS_PENALTY`, otherwise any
/// open opponent two costs `REVEAL_THREAT_PENALTY` once.
pub fn hidden_state(board: &Board, perspective: Player) -> i32 {
    let opponent = perspective.opponent();
    let mut score = 0;

    for pos in Pos::all() {
        let square = board.square(pos);
        let (Some(top), Some(hidden)) = (square.top(), square.beneath_top()) else {
            continue;
        };
        if top.owner != perspective || hidden.owner != opponent {
            continue;
        }

        score += TRAPPED_PIECE_BONUS;

        let scratch = board.revealed(pos);
        if scratch.winner() == Some(opponent) {
            score += REVEAL_LOSS_PENALTY;
        } else if scratch.open_twos(opponent) > 0 {
            score += REVEAL_THREAT_PENALTY;
        }
    }

    score
}

#[inline]
fn signed(board: &Board, pos: Pos, perspective: Player, weight: i32) -> i32 {
    match board.top(pos) {
        Some(piece) if piece.owner == perspective => weight,
        Some(_) => -weight,
        None => 0,
    }
}
