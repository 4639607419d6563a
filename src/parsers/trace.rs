use super::reader::Reader;
use super::stack::Stack;
use crate::position::Position;
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
/// The kind of transition a trace entry records
pub enum StepKind {
    Start,
    Action,
    Goto,
    Accepted,
    PanicEntered,
    Discarded,
    Pruned,
    Recovered,
    LexicalError,
    Fatal,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// A snapshot of the parser taken after a significant transition
pub struct TraceEntry {
    pub kind: StepKind,
    #[serde(rename = "stepByStep")]
    pub steps: Vec<String>,
    #[serde(rename = "stepByStepDetailed")]
    pub details: Vec<Vec<String>>,
    /// The stack, top first
    pub stack: Vec<String>,
    pub input: Vec<String>,
    pub pointer: usize,
    /// The token and state whose action table cell was consulted
    #[serde(rename = "stepMarker")]
    pub marker: Option<(String, usize)>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Lexical,
    Syntactic,
    Fatal,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
/// A diagnosed error at a position on the input tape
pub struct ErrorRecord {
    #[serde(rename = "index")]
    pub position: usize,
    pub lexeme: String,
    pub message: String,
    pub kind: ErrorKind,
    /// Where the lexeme appears in the source text, when it came from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Position>,
}

/// Accumulates trace entries and error records for a single parse
#[derive(Debug, Default)]
pub struct Recorder {
    pub entries: Vec<TraceEntry>,
    pub errors: Vec<ErrorRecord>,
    locations: Vec<Position>,
}

impl Recorder {
    /// Creates a recorder. Locations, if given, are the source positions of
    /// the lexemes on the tape, in order.
    pub fn new(locations: Vec<Position>) -> Recorder {
        Recorder {
            entries: Vec::new(),
            errors: Vec::new(),
            locations,
        }
    }

    /// Appends a trace entry with one detail line per step
    pub fn step(
        &mut self,
        kind: StepKind,
        step: String,
        details: &[&str],
        stack: &Stack,
        reader: &Reader,
    ) {
        self.step_marked(kind, step, details, stack, reader, None);
    }

    /// Appends a trace entry marked with the action table cell consulted
    pub fn step_marked(
        &mut self,
        kind: StepKind,
        step: String,
        details: &[&str],
        stack: &Stack,
        reader: &Reader,
        marker: Option<(String, usize)>,
    ) {
        self.entries.push(TraceEntry {
            kind,
            steps: vec![step],
            details: vec![details.iter().map(|d| d.to_string()).collect()],
            stack: stack.snapshot(),
            input: reader.tape().to_vec(),
            pointer: reader.cursor(),
            marker,
        });
    }

    /// Records an error for the lexeme under the reader's cursor
    pub fn error(&mut self, kind: ErrorKind, reader: &Reader, message: String) {
        let position = reader.cursor();
        self.errors.push(ErrorRecord {
            position,
            lexeme: reader.lookahead().to_string(),
            message,
            kind,
            location: self.locations.get(position).copied(),
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_serialized_shape() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let reader = Reader::new(vec!["a".to_string()]);
        let mut recorder = Recorder::new(vec![Position { line: 1, column: 3 }]);

        recorder.step_marked(
            StepKind::Action,
            "ACTION[a, 0] => s1".to_string(),
            &["looked up the action table"],
            &Stack::new(),
            &reader,
            Some(("a".to_string(), 0)),
        );
        recorder.error(ErrorKind::Syntactic, &reader, "oops".to_string());

        let entry = serde_json::to_value(&recorder.entries[0])?;
        assert_eq!(entry["kind"], "action");
        assert_eq!(entry["stepByStep"][0], "ACTION[a, 0] => s1");
        assert_eq!(entry["stepByStepDetailed"][0][0], "looked up the action table");
        assert_eq!(entry["stack"], serde_json::json!(["0"]));
        assert_eq!(entry["input"], serde_json::json!(["a", "$"]));
        assert_eq!(entry["pointer"], 0);
        assert_eq!(entry["stepMarker"], serde_json::json!(["a", 0]));

        let error = serde_json::to_value(&recorder.errors[0])?;
        assert_eq!(error["index"], 0);
        assert_eq!(error["lexeme"], "a");
        assert_eq!(error["kind"], "syntactic");
        assert_eq!(error["location"]["column"], 3);

        Ok(())
    }
}
