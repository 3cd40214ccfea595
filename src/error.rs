//! Error types for utcompress decoding operations.

use std::fmt;

/// Error returned when compact text cannot be parsed.
///
/// Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A structural character was expected but something else (or nothing) was found
    Expected {
        expected: char,
        found: Option<char>,
        pos: usize,
    },
    /// A bare word that is not `true`, `false` or `null`
    UnknownKeyword { word: String, pos: usize },
    /// A number literal that does not parse
    BadNumber { text: String, pos: usize },
    /// A `*XX` or `**XXXX` escape with missing or non-hex digits
    BadEscape { pos: usize },
    /// Arrays and objects nested beyond the parser's depth limit
    TooDeep { pos: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected { expected, found: Some(found), pos } => {
                write!(f, "bad compact text syntax at {pos}: expected '{expected}', got '{found}'")
            }
            Self::Expected { expected, found: None, pos } => {
                write!(f, "bad compact text syntax at {pos}: expected '{expected}', got end of input")
            }
            Self::UnknownKeyword { word, pos } => write!(f, "bad value keyword at {pos}: {word}"),
            Self::BadNumber { text, pos } => write!(f, "bad number at {pos}: {text}"),
            Self::BadEscape { pos } => write!(f, "bad character escape at {pos}"),
            Self::TooDeep { pos } => write!(f, "compact text nested too deeply at {pos}"),
        }
    }
}

impl std::error::Error for ParseError {}
