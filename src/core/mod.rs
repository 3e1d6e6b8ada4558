//! The rules core: position representation, move legality, move execution, legal
//! move generation, game-status resolution, and the Zobrist position hash. Nothing
//! in this module performs I/O or knows about players, the CLI, or persistence.

pub mod executor;
pub mod generator;
pub mod parsing;
pub mod position;
pub mod pseudo;
pub mod status;
pub mod validator;
pub mod zobrist;

pub use executor::apply_and_record;
pub use generator::generate_all_legal;
pub use parsing::parse_uci_move;
pub use position::{Color, GameStatus, Move, PieceKind, Position, Square};
pub use status::resolve as resolve_status;
pub use validator::is_legal;
pub use zobrist::ZobristKeys;
