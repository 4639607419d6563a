use crate::lexer::END_MARKER;

/// A cursor over an input tape, which always ends with the end marker
pub struct Reader {
    tape: Vec<String>,
    cursor: usize,
}

impl Reader {
    /// Creates a reader over a tape, appending the end marker if the tape
    /// does not already end with one
    pub fn new(mut tape: Vec<String>) -> Reader {
        if tape.last().map(String::as_str) != Some(END_MARKER) {
            tape.push(END_MARKER.to_string());
        }
        Reader { tape, cursor: 0 }
    }

    /// Returns the lexeme under the cursor, or the end marker once the tape
    /// is exhausted
    pub fn lookahead(&self) -> &str {
        self.tape
            .get(self.cursor)
            .map(String::as_str)
            .unwrap_or(END_MARKER)
    }

    /// Advances the cursor by one position. Returns false if this moves the
    /// cursor past the end of the tape.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.tape.len() {
            self.cursor += 1;
        }
        self.cursor < self.tape.len()
    }

    /// Returns the index of the next unconsumed lexeme
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the whole tape
    pub fn tape(&self) -> &[String] {
        &self.tape
    }
}
