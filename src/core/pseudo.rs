//! Per-piece movement rules (predicate B of §4.2), shared by the validator (checking
//! one candidate move), the generator (enumerating all candidates), and attack
//! detection (collecting destination squares without applying the no-self-check
//! filter). Castling is deliberately absent here: §4.2 handles it "separately".

use super::position::{rank_of, Color, Move, PieceKind, Position, Square, PROMOTION_KINDS};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0), (-1, -1), (0, -1), (1, -1),
];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn in_bounds(file: i8, rank: i8) -> bool {
    (0..8).contains(&file) && (0..8).contains(&rank)
}

fn step_targets(from: Square, offsets: &[(i8, i8)]) -> Vec<Square> {
    let (ff, fr) = (from as i8 % 8, from as i8 / 8);
    offsets
        .iter()
        .filter_map(|(df, dr)| {
            let (nf, nr) = (ff + df, fr + dr);
            if in_bounds(nf, nr) {
                Some((nr * 8 + nf) as Square)
            } else {
                None
            }
        })
        .collect()
}

fn sliding_targets(from: Square, dirs: &[(i8, i8)], occupied: u64) -> Vec<Square> {
    let (ff, fr) = (from as i8 % 8, from as i8 / 8);
    let mut out = Vec::new();
    for (df, dr) in dirs {
        let (mut nf, mut nr) = (ff + df, fr + dr);
        while in_bounds(nf, nr) {
            let sq = (nr * 8 + nf) as Square;
            out.push(sq);
            if occupied & (1u64 << sq) != 0 {
                break;
            }
            nf += df;
            nr += dr;
        }
    }
    out
}

/// All pseudo-legal moves of one piece standing on `from`, ignoring king safety.
/// Used both to enumerate candidates and, stripped to just destinations, to test
/// whether `from`'s color attacks a given square.
pub fn piece_pseudo_moves(position: &Position, color: Color, kind: PieceKind, from: Square) -> Vec<Move> {
    let own = position.side(color).occupancy();
    let enemy = position.side(color.opponent()).occupancy();
    let occupied = own | enemy;

    match kind {
        PieceKind::Pawn => pawn_pseudo_moves(position, color, from),
        PieceKind::Knight => step_targets(from, &KNIGHT_OFFSETS)
            .into_iter()
            .filter(|&to| own & (1u64 << to) == 0)
            .map(Move::new)
            .collect(),
        PieceKind::Bishop => sliding_targets(from, &BISHOP_DIRS, occupied)
            .into_iter()
            .filter(|&to| own & (1u64 << to) == 0)
            .map(Move::new)
            .collect(),
        PieceKind::Rook => sliding_targets(from, &ROOK_DIRS, occupied)
            .into_iter()
            .filter(|&to| own & (1u64 << to) == 0)
            .map(Move::new)
            .collect(),
        PieceKind::Queen => {
            let mut dirs = BISHOP_DIRS.to_vec();
            dirs.extend_from_slice(&ROOK_DIRS);
            sliding_targets(from, &dirs, occupied)
                .into_iter()
                .filter(|&to| own & (1u64 << to) == 0)
                .map(Move::new)
                .collect()
        }
        PieceKind::King => step_targets(from, &KING_OFFSETS)
            .into_iter()
            .filter(|&to| own & (1u64 << to) == 0)
            .map(Move::new)
            .collect(),
    }
}

fn is_promotion_rank(color: Color, rank: u8) -> bool {
    match color {
        Color::White => rank == 7,
        Color::Black => rank == 0,
    }
}

fn pawn_pseudo_moves(position: &Position, color: Color, from: Square) -> Vec<Move> {
    let own = position.side(color).occupancy();
    let enemy = position.side(color.opponent()).occupancy();
    let occupied = own | enemy;
    let dir = color.pawn_direction();
    let home_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    let mut out = Vec::new();
    let push = |to: i16, out: &mut Vec<Move>| {
        if !(0..64).contains(&to) {
            return;
        }
        let to = to as Square;
        if is_promotion_rank(color, rank_of(to)) {
            for kind in PROMOTION_KINDS {
                out.push(Move::promoting(from, to, kind));
            }
        } else {
            out.push(Move::new(from, to));
        }
    };

    let single = from as i16 + 8 * dir as i16;
    if (0..64).contains(&single) && occupied & (1u64 << single) == 0 {
        push(single, &mut out);

        let double = from as i16 + 16 * dir as i16;
        if rank_of(from) == home_rank
            && (0..64).contains(&double)
            && occupied & (1u64 << double) == 0
        {
            out.push(Move::new(from, double as Square));
        }
    }

    for delta in [7i16, 9i16] {
        let to = from as i16 + delta * dir as i16;
        if !(0..64).contains(&to) {
            continue;
        }
        // reject file-wrap: a legal pawn diagonal changes file by exactly one
        if (file_of_i16(to) as i16 - file_of_i16(from as i16) as i16).abs() != 1 {
            continue;
        }
        let to_sq = to as Square;
        let to_bit = 1u64 << to_sq;
        if enemy & to_bit != 0 {
            push(to, &mut out);
        } else if Some(to_sq) == position.en_passant_target {
            out.push(Move::new(from, to_sq));
        }
    }

    out
}

fn file_of_i16(square: i16) -> i16 {
    square.rem_euclid(8)
}

/// True iff any piece of `attacker` has a predicate-B pseudo-legal move landing on
/// `square`. Castling candidates are excluded, matching §4.2's "predicate B only".
pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    let side = position.side(attacker);
    for kind in super::position::ALL_PIECE_KINDS {
        let mut bb = side.get(kind);
        while bb != 0 {
            let from = bb.trailing_zeros() as Square;
            bb &= bb - 1;
            for mv in piece_pseudo_moves(position, attacker, kind, from) {
                if mv.to == square {
                    return true;
                }
            }
        }
    }
    false
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
    fn knight_from_b1_has_two_destinations_at_start() {
        let p = starting_position();
        let moves = piece_pseudo_moves(&p, Color::White, PieceKind::Knight, square_of(1, 0));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn pawn_on_home_rank_can_double_push() {
        let p = starting_position();
        let moves = pawn_pseudo_moves(&p, Color::White, square_of(4, 1));
        assert!(moves.iter().any(|m| m.to == square_of(4, 3)));
    }

    #[test]
    fn king_on_e1_not_attacked_at_start() {
        let p = starting_position();
        assert!(!is_square_attacked(&p, square_of(4, 0), Color::Black));
    }
}
