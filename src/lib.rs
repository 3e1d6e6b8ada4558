pub mod cli;
pub mod core;
pub mod driver;
pub mod errors;
pub mod persistence;
pub mod players;
pub mod printer;

pub mod prelude {
    // Useful structs
    pub use crate::core::{Color, GameStatus, Move, PieceKind, Position};
    pub use crate::driver::GameDriver;
    pub use crate::players::PlayerKind;

    // Useful functions
    pub use crate::core::parsing::{move_to_uci, parse_uci_move};
    pub use crate::printer::{print_bitboard, print_board};
}
