use super::position::{square_of, Move, PieceKind};
use crate::errors::ParseMoveError;

/// Parses the UCI move grammar of §6.2: `[a-h][1-8][a-h][1-8]([qrbn])?`.
pub fn parse_uci_move(input: &str) -> Result<Move, ParseMoveError> {
    let chars: Vec<char> = input.trim().chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return Err(ParseMoveError::WrongLength(chars.len()));
    }

    let from = parse_square(chars[0], chars[1])?;
    let to = parse_square(chars[2], chars[3])?;

    if chars.len() == 5 {
        let promotion = match chars[4].to_ascii_lowercase() {
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            c => return Err(ParseMoveError::BadPromotion(c)),
        };
        Ok(Move::promoting(from, to, promotion))
    } else {
        Ok(Move::new(from, to))
    }
}

fn parse_square(file_char: char, rank_char: char) -> Result<u8, ParseMoveError> {
    let file_char = file_char.to_ascii_lowercase();
    if !('a'..='h').contains(&file_char) {
        return Err(ParseMoveError::BadFile(file_char));
    }
    if !('1'..='8').contains(&rank_char) {
        return Err(ParseMoveError::BadRank(rank_char));
    }
    let file = file_char as u8 - b'a';
    let rank = rank_char as u8 - b'1';
    Ok(square_of(file, rank))
}

/// Renders a move back to UCI notation, for echoing confirmations and for the save
/// format's human-readable companions (not used by §6.4's binary-ish layout itself).
pub fn move_to_uci(mv: Move) -> String {
    let mut s = square_to_uci(mv.from);
    s.push_str(&square_to_uci(mv.to));
    if let Some(kind) = mv.promotion {
        s.push(match kind {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => unreachable!("pawns/kings are never promotion targets"),
        });
    }
    s
}

fn square_to_uci(square: u8) -> String {
    let file = (b'a' + square % 8) as char;
    let rank = (b'1' + square / 8) as char;
    format!("{}{}", file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_move() {
        let mv = parse_uci_move("e2e4").unwrap();
        assert_eq!(mv.from, square_of(4, 1));
        assert_eq!(mv.to, square_of(4, 3));
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn parses_promotion() {
        let mv = parse_uci_move("a7a8q").unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn rejects_bad_file() {
        assert!(parse_uci_move("i2i4").is_err());
    }

    #[test]
    fn round_trips_through_uci_text() {
        let mv = parse_uci_move("g1f3").unwrap();
        assert_eq!(move_to_uci(mv), "g1f3");
    }
}
