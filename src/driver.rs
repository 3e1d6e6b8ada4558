use crate::core::{self, Color, GameStatus, Move, PieceKind, Position, ZobristKeys};
use crate::errors::ParseMoveError;

/// Owns one game's state and wires together the core's validate/execute/resolve
/// pipeline for a single ply. This is the public surface of §6.1; the CLI and the
/// auto-players in [`crate::players`] are built entirely on top of it.
#[derive(Debug, Clone)]
pub struct GameDriver {
    position: Position,
    side_to_move: Color,
    zobrist: ZobristKeys,
}

impl GameDriver {
    /// Starts a new game from the standard opening position.
    pub fn new_game() -> Self {
        let zobrist = ZobristKeys::random();
        let mut position = Position::empty();
        for (kind, bb) in core::position::STARTING_WHITE {
            position.white.set(kind, bb);
        }
        for (kind, bb) in core::position::STARTING_BLACK {
            position.black.set(kind, bb);
        }
        let hash = zobrist.hash(&position, Color::White);
        position.record_hash(hash);

        GameDriver {
            position,
            side_to_move: Color::White,
            zobrist,
        }
    }

    /// Rebuilds a driver from a previously-saved position, side to move, and Zobrist
    /// table (§6.4). No extra hashing happens here: the saved `position_list` is
    /// trusted as-is.
    pub fn from_parts(position: Position, side_to_move: Color, zobrist: ZobristKeys) -> Self {
        GameDriver {
            position,
            side_to_move,
            zobrist,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn zobrist(&self) -> &ZobristKeys {
        &self.zobrist
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn status(&self) -> GameStatus {
        self.position.status
    }

    pub fn parse_move(&self, uci: &str) -> Result<Move, ParseMoveError> {
        core::parse_uci_move(uci)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        core::is_legal(&self.position, mv, self.side_to_move)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        core::generate_all_legal(&self.position, self.side_to_move)
    }

    /// Applies `mv`, which must already have passed [`GameDriver::is_legal`], then
    /// re-resolves the game status and flips the side to move. A call on a finished
    /// game (§7's `GameOver`) is ignored.
    pub fn apply(&mut self, mv: Move) {
        if self.position.status.is_terminal() {
            return;
        }
        core::apply_and_record(&mut self.position, mv, self.side_to_move, &self.zobrist);
        self.side_to_move = self.side_to_move.opponent();
        self.position.status = core::resolve_status(&self.position, self.side_to_move);
    }

    /// Records a resignation; sticky per §4.5 step 1.
    pub fn resign(&mut self, resigning: Color) {
        self.position.status = match resigning {
            Color::White => GameStatus::WhiteResigns,
            Color::Black => GameStatus::BlackResigns,
        };
    }

    /// Records a mutually agreed draw; sticky per §4.5 step 1.
    pub fn agree_draw(&mut self) {
        self.position.status = GameStatus::DrawAgreement;
    }

    /// Material balance from `perspective`'s point of view, per §6.1: pawn=1,
    /// knight=3, bishop=3, rook=5, queen=9, king uncounted.
    pub fn material_score(&self, perspective: Color) -> i32 {
        let white_score = material_sum(&self.position, Color::White);
        let black_score = material_sum(&self.position, Color::Black);
        match perspective {
            Color::White => white_score - black_score,
            Color::Black => black_score - white_score,
        }
    }
}

fn material_sum(position: &Position, color: Color) -> i32 {
    let side = position.side(color);
    [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ]
    .iter()
    .map(|&kind| side.get(kind).count_ones() as i32 * kind.material_value())
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_game_has_twenty_legal_moves() {
        let driver = GameDriver::new_game();
        assert_eq!(driver.legal_moves().len(), 20);
    }

    #[test]
    fn material_score_is_zero_at_start() {
        let driver = GameDriver::new_game();
        assert_eq!(driver.material_score(Color::White), 0);
    }

    #[test]
    fn resignation_is_sticky_against_further_moves() {
        let mut driver = GameDriver::new_game();
        driver.resign(Color::White);
        let before = driver.status();
        let mv = driver.parse_move("e2e4").unwrap();
        driver.apply(mv);
        assert_eq!(driver.status(), before);
    }

    #[test]
    fn threefold_repetition_via_knight_shuffle() {
        let mut driver = GameDriver::new_game();
        let plies = ["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8"];
        for uci in plies {
            let mv = driver.parse_move(uci).unwrap();
            assert!(driver.is_legal(mv), "{uci} should be legal");
            driver.apply(mv);
        }
        assert_eq!(driver.status(), GameStatus::ThreefoldRepetition);
    }
}
