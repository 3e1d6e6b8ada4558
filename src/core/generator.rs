use super::position::{Color, Move, PieceKind, Position, ALL_PIECE_KINDS};
use super::pseudo::piece_pseudo_moves;
use super::validator::is_legal;

const WHITE_KING_HOME: u8 = 4;
const BLACK_KING_HOME: u8 = 60;

/// Enumerates every pseudo-legal move of `side`: per-piece movement rules plus the
/// two castling candidates, with no king-safety filtering yet. Mirrors §4.3.
pub fn generate_pseudo_legal(position: &Position, side: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let board = position.side(side);
    for kind in ALL_PIECE_KINDS {
        let mut bb = board.get(kind);
        while bb != 0 {
            let from = bb.trailing_zeros() as u8;
            bb &= bb - 1;
            moves.extend(piece_pseudo_moves(position, side, kind, from));
        }
    }

    let king_home = match side {
        Color::White => WHITE_KING_HOME,
        Color::Black => BLACK_KING_HOME,
    };
    if position.piece_at(king_home) == Some((side, PieceKind::King)) {
        moves.push(Move::new(king_home, king_home + 2));
        moves.push(Move::new(king_home, king_home - 2));
    }

    moves
}

/// Filters [`generate_pseudo_legal`]'s output through [`is_legal`], producing the
/// set a driver or auto-player may actually play. Implements §4.3's
/// `generateAllLegal`.
pub fn generate_all_legal(position: &Position, side: Color) -> Vec<Move> {
    generate_pseudo_legal(position, side)
        .into_iter()
        .filter(|&mv| is_legal(position, mv, side))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::{STARTING_BLACK, STARTING_WHITE};

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
    fn starting_position_has_twenty_legal_moves_for_white() {
        let p = starting_position();
        assert_eq!(generate_all_legal(&p, Color::White).len(), 20);
    }
}
