use super::position::{Color, Move, PieceKind, Position, Square};
use super::zobrist::ZobristKeys;

const WHITE_KING_HOME: Square = 4; // e1
const BLACK_KING_HOME: Square = 60; // e8
const ROOK_HOME_SQUARES: [Square; 4] = [0, 7, 56, 63]; // a1, h1, a8, h8

fn is_castling(mv: Move, side: Color, moving_kind: PieceKind) -> bool {
    if moving_kind != PieceKind::King {
        return false;
    }
    let home = match side {
        Color::White => WHITE_KING_HOME,
        Color::Black => BLACK_KING_HOME,
    };
    mv.from == home && (mv.to == home + 2 || mv.to + 2 == home)
}

/// Implements §4.4 steps 1-5: mutates `position` in place for one validated move.
/// Does not touch the half-move clock, hash, or history (step 6) — callers that need
/// repetition bookkeeping use [`apply_and_record`] instead; the validator's
/// no-self-check probe only needs the board mutation, so it calls this directly on a
/// throwaway clone.
pub fn apply_move(position: &mut Position, mv: Move, side: Color) {
    let moving_kind = match position.piece_at(mv.from) {
        Some((_, kind)) => kind,
        None => return,
    };

    let mut reset_clock = moving_kind == PieceKind::Pawn;

    if is_castling(mv, side, moving_kind) {
        let kingside = mv.to > mv.from;
        let rook_from = if kingside { mv.from + 3 } else { mv.from - 4 };
        let rook_to = if kingside { mv.from + 1 } else { mv.from - 1 };
        position.clear_square(side, mv.from);
        position.clear_square(side, rook_from);
        let side_board = position.side_mut(side);
        side_board.set(PieceKind::King, side_board.get(PieceKind::King) | (1u64 << mv.to));
        side_board.set(PieceKind::Rook, side_board.get(PieceKind::Rook) | (1u64 << rook_to));
    } else if moving_kind == PieceKind::Pawn && Some(mv.to) == position.en_passant_target && file_diff(mv.from, mv.to) {
        let dir = side.pawn_direction() as i16;
        let captured_sq = (mv.to as i16 - 8 * dir) as Square;
        position.clear_square(side.opponent(), captured_sq);
        position.clear_square(side, mv.from);
        let side_board = position.side_mut(side);
        side_board.set(PieceKind::Pawn, side_board.get(PieceKind::Pawn) | (1u64 << mv.to));
        reset_clock = true;
    } else {
        let was_capture = position.side(side.opponent()).occupancy() & (1u64 << mv.to) != 0;
        position.clear_square(side.opponent(), mv.to);
        position.clear_square(side, mv.from);
        let placed_kind = mv.promotion.unwrap_or(moving_kind);
        let side_board = position.side_mut(side);
        side_board.set(placed_kind, side_board.get(placed_kind) | (1u64 << mv.to));
        reset_clock = reset_clock || was_capture;
    }

    if moving_kind == PieceKind::King {
        position.castling.set_king_moved(side);
    }
    for &home in &ROOK_HOME_SQUARES {
        if mv.from == home || mv.to == home {
            update_rook_flag(position, home);
        }
    }

    let double_push = moving_kind == PieceKind::Pawn && (mv.to as i16 - mv.from as i16).abs() == 16;
    position.en_passant_target = if double_push {
        Some(((mv.from as i16 + mv.to as i16) / 2) as Square)
    } else {
        None
    };

    position.half_move_clock = if reset_clock { 0 } else { position.half_move_clock + 1 };
}

fn file_diff(from: Square, to: Square) -> bool {
    ((to % 8) as i16 - (from % 8) as i16).abs() == 1
}

fn update_rook_flag(position: &mut Position, home: Square) {
    match home {
        0 => position.castling.white_rook_a1_moved = true,
        7 => position.castling.white_rook_h1_moved = true,
        56 => position.castling.black_rook_a8_moved = true,
        63 => position.castling.black_rook_h8_moved = true,
        _ => unreachable!(),
    }
}

/// Full application per §4.4: board mutation plus the clock/hash bookkeeping of
/// step 6. This is what [`crate::driver::GameDriver`] calls for a validated move.
pub fn apply_and_record(position: &mut Position, mv: Move, side: Color, zobrist: &ZobristKeys) {
    apply_move(position, mv, side);
    let hash = zobrist.hash(position, side.opponent());
    position.record_hash(hash);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::{square_of, STARTING_BLACK, STARTING_WHITE};

    fn starting_position() -> Position {
        let mut p = Position::empty();
        for (kind, bb) in STARTING_WHITE {
            p.white.set(kind, bb);
        }
        for (kind, bb) in STARTING_BLACK {
            p.black.set(kind, bb);
        }
        p
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut p = starting_position();
        apply_move(&mut p, Move::new(square_of(4, 1), square_of(4, 3)), Color::White);
        assert_eq!(p.en_passant_target, Some(square_of(4, 2)));
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let mut p = starting_position();
        apply_move(&mut p, Move::new(square_of(4, 1), square_of(4, 3)), Color::White); // e2e4
        apply_move(&mut p, Move::new(square_of(0, 6), square_of(0, 5)), Color::Black); // a7a6
        apply_move(&mut p, Move::new(square_of(4, 3), square_of(4, 4)), Color::White); // e4e5
        apply_move(&mut p, Move::new(square_of(3, 6), square_of(3, 4)), Color::Black); // d7d5

        let ep_capture = Move::new(square_of(4, 4), square_of(3, 5)); // e5d6 ep
        assert!(crate::core::validator::is_legal(&p, ep_capture, Color::White));

        apply_move(&mut p, ep_capture, Color::White);
        assert_eq!(p.black.get(PieceKind::Pawn) & (1u64 << square_of(3, 4)), 0);
        assert_ne!(p.white.get(PieceKind::Pawn) & (1u64 << square_of(3, 5)), 0);
    }

    #[test]
    fn rook_capture_sets_opponent_rook_moved_flag() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        p.white.set(PieceKind::Rook, 1u64 << square_of(0, 7)); // a8
        p.black.set(PieceKind::Rook, 1u64 << square_of(7, 7)); // h8, untouched
        apply_move(&mut p, Move::new(square_of(0, 7), square_of(7, 7)), Color::White);
        assert!(p.castling.black_rook_h8_moved);
    }

    #[test]
    fn castling_moves_both_king_and_rook() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.white.set(PieceKind::Rook, 1u64 << square_of(7, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        apply_move(&mut p, Move::new(square_of(4, 0), square_of(6, 0)), Color::White);
        assert_ne!(p.white.get(PieceKind::King) & (1u64 << square_of(6, 0)), 0);
        assert_ne!(p.white.get(PieceKind::Rook) & (1u64 << square_of(5, 0)), 0);
        assert!(p.castling.white_king_moved);
        assert!(p.castling.white_rook_h1_moved);
    }
}
