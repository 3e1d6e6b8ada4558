use crate::core::{Color, PieceKind, Position};

fn piece_to_char(kind: PieceKind, color: Color) -> char {
    let c = match kind {
        PieceKind::King => 'K',
        PieceKind::Queen => 'Q',
        PieceKind::Rook => 'R',
        PieceKind::Bishop => 'B',
        PieceKind::Knight => 'N',
        PieceKind::Pawn => 'P',
    };
    if color == Color::White {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

/// Renders the board, ranks 8 down to 1 and files a through h, uppercase for White
/// and lowercase for Black, `.` for an empty square.
pub fn print_board(position: &Position) {
    print!("   ");
    for file in 0..8u8 {
        print!(" {}", (b'a' + file) as char);
    }
    println!();

    for rank in (0..8u8).rev() {
        print!(" {} ", rank + 1);
        for file in 0..8u8 {
            let square = rank * 8 + file;
            match position.piece_at(square) {
                Some((color, kind)) => print!(" {}", piece_to_char(kind, color)),
                None => print!(" ."),
            }
        }
        println!();
    }
}

/// Renders a raw bitboard as an 8x8 grid of `X`/`.`, ranks 8 down to 1.
pub fn print_bitboard(bitboard: u64) {
    for rank in (0..8u8).rev() {
        for file in 0..8u8 {
            let bit = 1u64 << (rank * 8 + file);
            if bitboard & bit != 0 {
                print!(" X ");
            } else {
                print!(" . ");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::GameDriver;

    #[test]
    fn print_board_does_not_panic_on_starting_position() {
        let driver = GameDriver::new_game();
        print_board(driver.position());
    }
}
