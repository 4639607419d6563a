use serde::Serialize;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
/// A reference to a line number within an input string, and the position of a
/// character within that line. All indexes begin at 1.
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Returns a new reference with all fields initialized to 1
    pub fn new() -> Position {
        Position { line: 1, column: 1 }
    }

    /// Advances the position over every character in text
    pub fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.column = 1;
                self.line += 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
