mod token;
use crate::position::Position;
use once_cell::sync::Lazy;
use regex::Regex;
pub use token::{Lexeme, END_MARKER};

/// Alternatives are tried in order at each position, so identifiers win over
/// numbers, and two-character operators win over their one-character
/// prefixes
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[A-Za-z_][A-Za-z_0-9]*",
        r"|\d+\.\d+|\d+",
        r"|\+\+|--|==|!=|<=|>=",
        r"|[+\-*/%(){}\[\];|&]",
    ))
    .expect("token regex is valid")
});

/// A lexer for parser input. Characters that begin no lexeme, including
/// whitespace, are skipped and act only as separators.
pub struct Lexer<'a> {
    input: &'a str,
    cursor: usize,
    position: Position,
}

impl<'a> Lexer<'a> {
    /// Returns a new lexer for the given input string
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            input,
            cursor: 0,
            position: Position::new(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        let m = TOKEN_REGEX.find_at(self.input, self.cursor)?;

        self.position.advance_over(&self.input[self.cursor..m.start()]);
        let lexeme = Lexeme {
            text: m.as_str().to_string(),
            position: self.position,
        };

        self.position.advance_over(m.as_str());
        self.cursor = m.end();

        Some(lexeme)
    }
}

/// Splits the input into lexemes
pub fn tokenize(input: &str) -> Vec<Lexeme> {
    Lexer::new(input).collect()
}

/// Returns the texts of the lexemes in the input, followed by the end marker
pub fn tape(input: &str) -> Vec<String> {
    Lexer::new(input)
        .map(|l| l.text)
        .chain(std::iter::once(END_MARKER.to_string()))
        .collect()
}
