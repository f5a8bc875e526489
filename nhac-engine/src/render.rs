//! Plain-text rendering of boards and moves for the harness and logs.
//!
//! Coordinates are a column letter (A-C) followed by a row number (1-3), so
//! `B2` is the center.
//!
//! ```text
//!      A    B    C
//! 1  [OL] [  ] [BS]
//! 2  [  ] [BM] [  ]
//! 3  [  ] [  ] [OS]
//!
//! Orange: S(1) M(2) L(1)
//! Blue:   S(1) M(1) L(2)
//! ```

use std::fmt::Write;

use nhac_core::{Board, Move, Piece, Player, Pos, Size};

pub fn player_name(player: Player) -> &'static str {
    match player {
        Player::Orange => "Orange",
        Player::Blue => "Blue",
    }
}

pub fn size_letter(size: Size) -> char {
    match size {
        Size::Small => 'S',
        Size::Medium => 'M',
        Size::Large => 'L',
    }
}

fn piece_glyph(piece: Piece) -> String {
    let owner = match piece.owner {
        Player::Orange => 'O',
        Player::Blue => 'B',
    };
    format!("{owner}{}", size_letter(piece.size))
}

/// Column letter and 1-based row, e.g. `A1` for cell 0.
pub fn coord(pos: Pos) -> String {
    let col = (b'A' + pos.col()) as char;
    format!("{col}{}", pos.row() + 1)
}

/// Human-readable move, e.g. `Orange place L at B2` or `Blue move A1 to C3`.
pub fn render_move(mov: &Move) -> String {
    let who = player_name(mov.player());
    match mov {
        Move::Place { piece, to } => {
            format!("{who} place {} at {}", size_letter(piece.size), coord(*to))
        }
        Move::Relocate { piece, from, to } => format!(
            "{who} move {} {} to {}",
            size_letter(piece.size),
            coord(*from),
            coord(*to)
        ),
    }
}

/// Grid of top pieces followed by both players' off-board counts.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("     A    B    C\n");
    for row in 0..3 {
        let _ = write!(out, "{}  ", row + 1);
        for col in 0..3 {
            let cell = match board.top_at(row, col) {
                Some(piece) => piece_glyph(piece),
                None => "  ".to_string(),
            };
            let _ = write!(out, "[{cell}]");
            if col < 2 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out.push('\n');
    for player in Player::all() {
        let pool = board.pool(player);
        let label = format!("{}:", player_name(player));
        let _ = write!(out, "{label:<8}");
        let counts: Vec<String> = Size::all()
            .map(|size| format!("{}({})", size_letter(size), pool.count(size)))
            .collect();
        let _ = writeln!(out, "{}", counts.join(" "));
    }
    out
}
