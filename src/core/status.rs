use super::generator::generate_all_legal;
use super::position::{Color, GameStatus, PieceKind, Position};
use super::pseudo::is_square_attacked;

/// Implements §4.5: maps `(position, side-to-move)` to a [`GameStatus`], in the order
/// the spec fixes — sticky terminal states first, then legal-move emptiness
/// (checkmate vs. stalemate), then the three automatic draw rules.
pub fn resolve(position: &Position, side_to_move: Color) -> GameStatus {
    if position.status.is_terminal()
        && matches!(
            position.status,
            GameStatus::DrawAgreement | GameStatus::WhiteResigns | GameStatus::BlackResigns
        )
    {
        return position.status;
    }

    let legal = generate_all_legal(position, side_to_move);
    if legal.is_empty() {
        let king_square = position.king_square(side_to_move);
        return if is_square_attacked(position, king_square, side_to_move.opponent()) {
            match side_to_move {
                Color::White => GameStatus::WhiteCheckmated,
                Color::Black => GameStatus::BlackCheckmated,
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if is_insufficient_material(position) {
        return GameStatus::InsufficientMaterial;
    }

    if let Some(&last) = position.position_list.last() {
        if position.repetition_count(last) >= 3 {
            return GameStatus::ThreefoldRepetition;
        }
    }

    if position.half_move_clock >= 100 {
        return GameStatus::FiftyMoveDraw;
    }

    GameStatus::InProgress
}

/// Exact replica of the original engine's `isInsufficientMaterial`: false if any
/// pawn, rook, or queen remains anywhere; otherwise true for bare kings,
/// king-plus-one-minor vs. bare king, same-colored-bishops-each, or
/// king-plus-two-knights vs. bare king.
fn is_insufficient_material(position: &Position) -> bool {
    let heavy = position.white.get(PieceKind::Pawn)
        | position.black.get(PieceKind::Pawn)
        | position.white.get(PieceKind::Rook)
        | position.black.get(PieceKind::Rook)
        | position.white.get(PieceKind::Queen)
        | position.black.get(PieceKind::Queen);
    if heavy != 0 {
        return false;
    }

    let white_knights = position.white.get(PieceKind::Knight).count_ones();
    let white_bishops = position.white.get(PieceKind::Bishop).count_ones();
    let black_knights = position.black.get(PieceKind::Knight).count_ones();
    let black_bishops = position.black.get(PieceKind::Bishop).count_ones();

    let white_minors = white_knights + white_bishops;
    let black_minors = black_knights + black_bishops;

    if white_minors == 0 && black_minors == 0 {
        return true;
    }

    if (white_minors == 1 && black_minors == 0) || (black_minors == 1 && white_minors == 0) {
        return true;
    }

    if white_bishops == 1 && black_bishops == 1 && white_knights == 0 && black_knights == 0 {
        let white_sq = position.white.get(PieceKind::Bishop).trailing_zeros() as u64;
        let black_sq = position.black.get(PieceKind::Bishop).trailing_zeros() as u64;
        let white_color = (white_sq / 8 + white_sq % 8) % 2;
        let black_color = (black_sq / 8 + black_sq % 8) % 2;
        if white_color == black_color {
            return true;
        }
    }

    if (white_knights == 2 && white_bishops == 0 && black_minors == 0)
        || (black_knights == 2 && black_bishops == 0 && white_minors == 0)
    {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::executor::apply_and_record;
    use crate::core::position::{square_of, STARTING_BLACK, STARTING_WHITE};
    use crate::core::zobrist::ZobristKeys;
    use pretty_assertions::assert_eq;

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
    fn bare_kings_is_insufficient_material() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        assert_eq!(resolve(&p, Color::White), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn one_minor_piece_versus_bare_king_is_insufficient_material() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.white.set(PieceKind::Knight, 1u64 << square_of(1, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        assert_eq!(resolve(&p, Color::White), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn same_colored_bishops_each_is_insufficient_material() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.white.set(PieceKind::Bishop, 1u64 << square_of(2, 0)); // c1, dark square
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        p.black.set(PieceKind::Bishop, 1u64 << square_of(5, 7)); // f8, dark square
        assert_eq!(resolve(&p, Color::White), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn two_knights_versus_bare_king_is_insufficient_material() {
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        let knights = (1u64 << square_of(1, 0)) | (1u64 << square_of(6, 0));
        p.white.set(PieceKind::Knight, knights);
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        assert_eq!(resolve(&p, Color::White), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn fifty_move_rule_triggers_on_the_hundredth_ply() {
        let keys = ZobristKeys::random();
        let mut p = Position::empty();
        p.white.set(PieceKind::King, 1u64 << square_of(4, 0));
        p.white.set(PieceKind::Knight, 1u64 << square_of(1, 0));
        p.black.set(PieceKind::King, 1u64 << square_of(4, 7));
        p.black.set(PieceKind::Knight, 1u64 << square_of(1, 7));
        p.half_move_clock = 99;
        let mv = crate::core::position::Move::new(square_of(1, 0), square_of(2, 2)); // Nb1c3
        apply_and_record(&mut p, mv, Color::White, &keys);
        assert_eq!(p.half_move_clock, 100);
        assert_eq!(resolve(&p, Color::Black), GameStatus::FiftyMoveDraw);
    }

    #[test]
    fn scholars_mate_checkmates_black() {
        let keys = ZobristKeys::random();
        let mut p = starting_position();
        let moves = [
            (square_of(4, 1), square_of(4, 3), Color::White), // e2e4
            (square_of(0, 6), square_of(0, 5), Color::Black), // a7a6
            (square_of(5, 0), square_of(2, 3), Color::White), // f1c4
            (square_of(0, 5), square_of(0, 4), Color::Black), // a6a5
            (square_of(3, 0), square_of(7, 4), Color::White), // d1h5
            (square_of(0, 4), square_of(0, 3), Color::Black), // a5a4
            (square_of(7, 4), square_of(5, 6), Color::White), // h5f7
        ];
        for (from, to, side) in moves {
            apply_and_record(&mut p, crate::core::position::Move::new(from, to), side, &keys);
        }
        assert_eq!(resolve(&p, Color::Black), GameStatus::BlackCheckmated);
    }
}
