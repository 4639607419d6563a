use crate::position::Position;
use std::fmt;

/// The end-of-input marker appended to every tape
pub const END_MARKER: &str = "$";

#[derive(Debug, PartialEq, Eq, Clone)]
/// A lexeme read from the source text, with the position of its first
/// character
pub struct Lexeme {
    pub text: String,
    pub position: Position,
}

impl fmt::Display for Lexeme {
    /// Formats the lexeme using the given formatter
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} '{}'", self.position, self.text)
    }
}
