//! Random-playout checks of the board invariants and the move generator.
//!
//! Every board reached here comes from `Board::new()` through moves the
//! generator produced, so these are the "reachable boards" of the rules.

use nhac_core::{legal_moves, Board, Move, Piece, Player, Pos, Size};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const GAMES: usize = 200;
const MAX_PLIES: usize = 40;

/// Play one random game, calling `visit` on every position and side to move.
fn random_game(rng: &mut StdRng, mut visit: impl FnMut(&Board, Player)) {
    let mut board = Board::new();
    let mut player = if rng.random_bool(0.5) {
        Player::Orange
    } else {
        Player::Blue
    };

    for _ in 0..MAX_PLIES {
        visit(&board, player);
        if board.winner().is_some() {
            break;
        }
        let moves = legal_moves(&board, player);
        if moves.is_empty() {
            break;
        }
        let mov = moves[rng.random_range(0..moves.len())];
        board = board.apply(mov).expect("generated move rejected by apply");
        player = player.opponent();
    }
}

/// Every syntactically possible move for `player`, legal or not.
fn all_candidates(player: Player) -> Vec<Move> {
    let mut candidates = Vec::new();
    for size in Size::all() {
        for to in Pos::all() {
            candidates.push(Move::place(player, size, to));
            for from in Pos::all() {
                candidates.push(Move::relocate(Piece::new(player, size), from, to));
            }
        }
    }
    candidates
}

#[test]
fn test_piece_conservation_and_covering() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..GAMES {
        random_game(&mut rng, |board, _| {
            for owner in Player::all() {
                for size in Size::all() {
                    assert_eq!(board.total_count(Piece::new(owner, size)), 2);
                }
            }
            for pos in Pos::all() {
                let sizes: Vec<Size> = board.square(pos).pieces().map(|p| p.size).collect();
                assert!(sizes.windows(2).all(|w| w[0] < w[1]), "bad stack at {pos:?}");
            }
            assert!(board.is_well_formed());
        });
    }
}

#[test]
fn test_generator_soundness() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..GAMES {
        random_game(&mut rng, |board, player| {
            for mov in legal_moves(board, player) {
                let piece = mov.piece();
                assert_eq!(piece.owner, player);
                if let Some(top) = board.top(mov.to()) {
                    assert!(piece.size > top.size, "{mov:?} breaks covering rule");
                }
                match mov {
                    Move::Place { .. } => assert!(board.pool(player).has(piece.size)),
                    Move::Relocate { from, to, .. } => {
                        assert_ne!(from, to);
                        assert_eq!(board.top(from), Some(piece));
                    }
                }
            }
        });
    }
}

#[test]
fn test_generator_matches_checked_apply() {
    // A candidate is accepted by `apply` exactly when the generator lists it.
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..40 {
        random_game(&mut rng, |board, player| {
            let moves = legal_moves(board, player);
            for candidate in all_candidates(player) {
                let generated = moves.contains(&candidate);
                let accepted = board.apply(candidate).is_ok();
                assert_eq!(generated, accepted, "{candidate:?} on {board:?}");
            }
        });
    }
}

#[test]
fn test_apply_pure_and_deterministic() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..GAMES {
        random_game(&mut rng, |board, player| {
            let before = *board;
            for mov in legal_moves(board, player) {
                let a = board.apply(mov).unwrap();
                let b = board.apply(mov).unwrap();
                assert_eq!(a, b);
                assert_eq!(a, board.apply_unchecked(mov));
            }
            assert_eq!(*board, before);
        });
    }
}

#[test]
fn test_legal_moves_stable_order() {
    let mut rng = StdRng::seed_from_u64(43);
    for _ in 0..GAMES {
        random_game(&mut rng, |board, player| {
            assert_eq!(legal_moves(board, player), legal_moves(board, player));
        });
    }
}

#[test]
fn test_winner_is_a_completed_line() {
    let mut rng = StdRng::seed_from_u64(59);
    for _ in 0..GAMES {
        random_game(&mut rng, |board, _| match board.winner() {
            Some(p) => assert!(board.has_won(p)),
            None => {
                assert!(!board.has_won(Player::Orange));
                assert!(!board.has_won(Player::Blue));
            }
        });
    }
}

#[test]
fn test_board_json_roundtrip() {
    let mut rng = StdRng::seed_from_u64(67);
    let mut last = Board::new();
    random_game(&mut rng, |board, _| last = *board);

    let json = serde_json::to_string(&last).unwrap();
    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back, last);

    let mov = Move::relocate(Piece::new(Player::Blue, Size::Large), Pos(0), Pos(4));
    let json = serde_json::to_value(mov).unwrap();
    assert_eq!(json["kind"], "relocate");
    assert_eq!(json["piece"]["owner"], "blue");
    assert_eq!(serde_json::from_value::<Move>(json).unwrap(), mov);
}

#[test]
fn test_stacking_scenario() {
    // Orange Small under Blue Medium at the center, then Orange Large on top.
    let center = Pos::from_row_col(1, 1);
    let mut board = Board::new();
    board = board.apply(Move::place(Player::Orange, Size::Small, center)).unwrap();
    board = board.apply(Move::place(Player::Blue, Size::Medium, center)).unwrap();
    assert_eq!(board.top_at(1, 1), Some(Piece::new(Player::Blue, Size::Medium)));

    let large = Move::place(Player::Orange, Size::Large, center);
    assert!(legal_moves(&board, Player::Orange).contains(&large));
    board = board.apply(large).unwrap();

    assert_eq!(board.top_at(1, 1), Some(Piece::new(Player::Orange, Size::Large)));
    assert_eq!(board.square(center).len(), 3);
    assert!(board.is_well_formed());
}
