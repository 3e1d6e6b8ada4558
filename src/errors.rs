use std::fmt;

/// Raised by [`crate::core::parsing::parse_uci_move`] when the input does not match
/// the UCI move grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    WrongLength(usize),
    BadFile(char),
    BadRank(char),
    BadPromotion(char),
}

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMoveError::WrongLength(n) => {
                write!(f, "move must be 4 or 5 characters, got {}", n)
            }
            ParseMoveError::BadFile(c) => write!(f, "'{}' is not a file in a..h", c),
            ParseMoveError::BadRank(c) => write!(f, "'{}' is not a rank in 1..8", c),
            ParseMoveError::BadPromotion(c) => write!(f, "'{}' is not a promotion piece", c),
        }
    }
}

impl std::error::Error for ParseMoveError {}

/// Raised while loading a saved game from disk.
///
/// A failed load must never leave the caller's in-flight `Position` mutated; callers
/// parse into a scratch value and only swap it in once this error type is not produced.
#[derive(Debug)]
pub enum SaveLoadError {
    Io(std::io::Error),
    Malformed(String),
}

impl fmt::Display for SaveLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveLoadError::Io(e) => write!(f, "i/o error: {}", e),
            SaveLoadError::Malformed(msg) => write!(f, "malformed save file: {}", msg),
        }
    }
}

impl std::error::Error for SaveLoadError {}

impl From<std::io::Error> for SaveLoadError {
    fn from(e: std::io::Error) -> Self {
        SaveLoadError::Io(e)
    }
}
