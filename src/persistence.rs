use std::fs;
use std::path::Path;

use crate::core::position::{CastlingFlags, ColorBitboards, ALL_PIECE_KINDS};
use crate::core::{Color, GameStatus, Position, ZobristKeys};
use crate::driver::GameDriver;
use crate::errors::SaveLoadError;
use crate::players::PlayerKind;

/// Writes the exact §6.4 layout: whitespace-separated, one logical section per line.
/// A loader only ever needs `split_whitespace`, matching the original engine's
/// stream-extraction-based reader which does not care about line breaks either.
pub fn save_game(
    path: impl AsRef<Path>,
    driver: &GameDriver,
    white_player: PlayerKind,
    black_player: PlayerKind,
) -> Result<(), SaveLoadError> {
    let position = driver.position();
    let mut out = String::new();

    for color in [Color::White, Color::Black] {
        let side = position.side(color);
        let line: Vec<String> = ALL_PIECE_KINDS.iter().map(|&k| side.get(k).to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }

    let flags = &position.castling;
    out.push_str(&format!(
        "{} {} {} {} {} {}\n",
        flags.white_king_moved as u8,
        flags.white_rook_a1_moved as u8,
        flags.white_rook_h1_moved as u8,
        flags.black_king_moved as u8,
        flags.black_rook_a8_moved as u8,
        flags.black_rook_h8_moved as u8,
    ));

    let ep = position.en_passant_target.map(|s| s as i32).unwrap_or(-1);
    out.push_str(&format!("{}\n", ep));
    out.push_str(&format!("{}\n", position.half_move_clock));

    out.push_str(&format!("{}\n", position.position_list.len()));
    let hashes: Vec<String> = position.position_list.iter().map(|h| h.to_string()).collect();
    out.push_str(&hashes.join(" "));
    out.push('\n');

    out.push_str(&format!("{}\n", driver.side_to_move().index()));
    out.push_str(&format!("{} {}\n", white_player.to_ordinal(), black_player.to_ordinal()));

    let (piece_keys, castle_keys, ep_keys, side_key) = driver.zobrist().to_parts();
    let piece_line: Vec<String> = piece_keys.iter().map(|k| k.to_string()).collect();
    out.push_str(&piece_line.join(" "));
    out.push('\n');
    let castle_line: Vec<String> = castle_keys.iter().map(|k| k.to_string()).collect();
    out.push_str(&castle_line.join(" "));
    out.push('\n');
    let ep_line: Vec<String> = ep_keys.iter().map(|k| k.to_string()).collect();
    out.push_str(&ep_line.join(" "));
    out.push('\n');
    out.push_str(&format!("{}\n", side_key));

    out.push_str(&format!("{}\n", status_ordinal(position.status)));

    fs::write(path, out)?;
    Ok(())
}

fn status_ordinal(status: GameStatus) -> i32 {
    status as i32
}

/// A flat cursor over whitespace-separated tokens. The original engine's reader is
/// stream-extraction based (`std::cin >>`) and does not care about line breaks
/// either, so this walks the file as one token stream rather than line-by-line.
struct TokenReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> TokenReader<'a> {
    fn new(text: &'a str) -> Self {
        TokenReader {
            tokens: text.split_whitespace(),
        }
    }

    fn token(&mut self) -> Result<&'a str, SaveLoadError> {
        self.tokens
            .next()
            .ok_or_else(|| SaveLoadError::Malformed("unexpected end of file".to_string()))
    }

    fn u64(&mut self) -> Result<u64, SaveLoadError> {
        let s = self.token()?;
        s.parse::<u64>()
            .map_err(|_| SaveLoadError::Malformed(format!("expected u64, got '{}'", s)))
    }

    fn i32(&mut self) -> Result<i32, SaveLoadError> {
        let s = self.token()?;
        s.parse::<i32>()
            .map_err(|_| SaveLoadError::Malformed(format!("expected i32, got '{}'", s)))
    }
}

/// Parses the §6.4 layout. On any malformed input, returns `Err` without touching
/// the caller's existing game — the new `Position`/`ZobristKeys`/players are only
/// assembled after every token has parsed successfully.
pub fn load_game(
    path: impl AsRef<Path>,
) -> Result<(GameDriver, PlayerKind, PlayerKind), SaveLoadError> {
    let text = fs::read_to_string(path)?;
    let mut r = TokenReader::new(&text);

    let mut position = Position::empty();

    for color in [Color::White, Color::Black] {
        let mut bitboards = ColorBitboards::empty();
        for &kind in ALL_PIECE_KINDS.iter() {
            bitboards.set(kind, r.u64()?);
        }
        *position.side_mut(color) = bitboards;
    }

    let mut flags = CastlingFlags::default();
    flags.white_king_moved = r.i32()? != 0;
    flags.white_rook_a1_moved = r.i32()? != 0;
    flags.white_rook_h1_moved = r.i32()? != 0;
    flags.black_king_moved = r.i32()? != 0;
    flags.black_rook_a8_moved = r.i32()? != 0;
    flags.black_rook_h8_moved = r.i32()? != 0;
    position.castling = flags;

    let ep = r.i32()?;
    position.en_passant_target = if ep < 0 { None } else { Some(ep as u8) };
    position.half_move_clock = r.i32()?.max(0) as u32;

    let history_len = r.i32()?;
    if history_len < 0 {
        return Err(SaveLoadError::Malformed("negative history length".to_string()));
    }
    for _ in 0..history_len {
        let h = r.u64()?;
        position.record_hash(h);
    }

    let current_player = r.i32()?;
    let side_to_move = match current_player {
        0 => Color::White,
        1 => Color::Black,
        _ => return Err(SaveLoadError::Malformed("currentPlayer must be 0 or 1".to_string())),
    };

    let white_player = PlayerKind::from_ordinal(r.i32()?)
        .ok_or_else(|| SaveLoadError::Malformed("unknown white player type".to_string()))?;
    let black_player = PlayerKind::from_ordinal(r.i32()?)
        .ok_or_else(|| SaveLoadError::Malformed("unknown black player type".to_string()))?;

    let mut piece_keys_flat = Vec::with_capacity(12 * 64);
    for _ in 0..(12 * 64) {
        piece_keys_flat.push(r.u64()?);
    }
    let mut castle_keys = [0u64; 4];
    for slot in castle_keys.iter_mut() {
        *slot = r.u64()?;
    }
    let mut ep_keys = [0u64; 8];
    for slot in ep_keys.iter_mut() {
        *slot = r.u64()?;
    }
    let side_key = r.u64()?;
    let zobrist = ZobristKeys::from_parts(&piece_keys_flat, castle_keys, ep_keys, side_key);

    position.status = GameStatus::from_ordinal(r.i32()?)
        .ok_or_else(|| SaveLoadError::Malformed("unknown game status".to_string()))?;

    Ok((GameDriver::from_parts(position, side_to_move, zobrist), white_player, black_player))
}
