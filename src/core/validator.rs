use super::executor::apply_move;
use super::position::{Color, Move, PieceKind, Position};
use super::pseudo::{is_square_attacked, piece_pseudo_moves};

const WHITE_KING_HOME: u8 = 4; // e1
const BLACK_KING_HOME: u8 = 60; // e8

/// Implements §4.2: predicate A (friendly piece at `from`), predicate B (per-piece
/// movement rule, including castling as a special case), and predicate C (the
/// no-self-check filter).
pub fn is_legal(position: &Position, mv: Move, side: Color) -> bool {
    if mv.from > 63 || mv.to > 63 {
        return false;
    }

    let own_piece = match position.piece_at(mv.from) {
        Some((color, kind)) if color == side => kind,
        _ => return false,
    };

    let accepted = if own_piece == PieceKind::King && is_castling_attempt(mv, side) {
        castling_is_legal(position, mv, side)
    } else {
        piece_pseudo_moves(position, side, own_piece, mv.from)
            .iter()
            .any(|candidate| candidate.from == mv.from && candidate.to == mv.to && candidate.promotion == mv.promotion)
    };

    accepted && !leaves_own_king_in_check(position, mv, side)
}

fn is_castling_attempt(mv: Move, side: Color) -> bool {
    let home = match side {
        Color::White => WHITE_KING_HOME,
        Color::Black => BLACK_KING_HOME,
    };
    mv.from == home && (mv.to == home + 2 || mv.to + 2 == home)
}

fn castling_is_legal(position: &Position, mv: Move, side: Color) -> bool {
    let kingside = mv.to > mv.from;
    let rook_moved = if kingside {
        position.castling.rook_h_moved(side)
    } else {
        position.castling.rook_a_moved(side)
    };
    if position.castling.king_moved(side) || rook_moved {
        return false;
    }

    let home = mv.from;
    let path: &[i8] = if kingside { &[1, 2] } else { &[-1, -2, -3] };
    let occupied = position.occupied();
    for &step in path {
        let square = (home as i8 + step) as u8;
        if occupied & (1u64 << square) != 0 {
            return false;
        }
    }

    let enemy = side.opponent();
    if is_square_attacked(position, home, enemy) {
        return false;
    }
    let crossed = if kingside { home + 1 } else { home - 1 };
    let landing = mv.to;
    !is_square_attacked(position, crossed, enemy) && !is_square_attacked(position, landing, enemy)
}

fn leaves_own_king_in_check(position: &Position, mv: Move, side: Color) -> bool {
    let mut clone = position.clone();
    apply_move(&mut clone, mv, side);
    let king_square = clone.king_square(side);
    is_square_attacked(&clone, king_square, side.opponent())
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
    fn knight_opening_is_legal() {
        let p = starting_position();
        assert!(is_legal(&p, Move::new(square_of(1, 0), square_of(2, 2)), Color::White));
    }

    #[test]
    fn rook_cannot_jump_over_own_pawn() {
        let p = starting_position();
        assert!(!is_legal(&p, Move::new(square_of(0, 0), square_of(0, 2)), Color::White));
    }

    #[test]
    fn moving_into_check_is_illegal() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        p.black.set(PieceKind::Rook, 1u64 << square_of(5, 7)); // f8, controls the f-file
        assert!(!is_legal(&p, Move::new(square_of(4, 0), square_of(5, 0)), Color::White));
    }

    #[test]
    fn castling_blocked_by_attacked_crossing_square() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0)); // e1
        p.white.set(PieceKind::Rook, 1u64 << square_of(7, 0)); // h1
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7)); // e8
        let black_rooks = (1u64 << square_of(7, 7)) | (1u64 << square_of(5, 7)); // h8, f8 (attacks f1)
        p.black.set(PieceKind::Rook, black_rooks);
        assert!(!is_legal(&p, Move::new(square_of(4, 0), square_of(6, 0)), Color::White));
    }
}
