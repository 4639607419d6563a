use super::expected::build_error_message;
use super::reader::Reader;
use super::stack::Stack;
use super::table::{Action, Tables};
use super::trace::{ErrorKind, ErrorRecord, Recorder, StepKind, TraceEntry};
use crate::errors::{Error, Result};
use crate::lexer::{self, END_MARKER};
use crate::position::Position;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;

/// The number of iterations after which a parse is abandoned. Only tables
/// which send the parser around a cycle without consuming input get here.
pub const MAX_ITERATIONS: usize = 1000;

/// Synchronizing symbols used for every grammar
pub const DEFAULT_SYNC_SYMBOLS: [&str; 5] = [";", "}", "]", ")", END_MARKER];

#[derive(Debug, Clone)]
/// Configuration for an LR parser
pub struct ParserConfig {
    sync_symbols: BTreeSet<String>,
}

impl ParserConfig {
    /// Returns a configuration with the default synchronizing symbols
    pub fn new() -> ParserConfig {
        ParserConfig {
            sync_symbols: DEFAULT_SYNC_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Adds a grammar terminal at which panic-mode recovery may resume
    pub fn with_sync_symbol(mut self, symbol: &str) -> ParserConfig {
        self.sync_symbols.insert(symbol.to_string());
        self
    }

    /// Adds several synchronizing symbols
    pub fn with_sync_symbols<I, S>(mut self, symbols: I) -> ParserConfig
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sync_symbols
            .extend(symbols.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns true if symbol is a synchronizing symbol
    pub fn is_sync(&self, symbol: &str) -> bool {
        self.sync_symbols.contains(symbol)
    }

    /// Returns the synchronizing symbols in sorted order
    pub fn sync_symbols(&self) -> impl Iterator<Item = &str> {
        self.sync_symbols.iter().map(String::as_str)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
/// The reason a parse was abandoned
pub enum FatalKind {
    /// A token not known to the grammar at all
    UnknownToken,
    /// Recovery popped every state without finding one to resume in
    StackEmptied,
    /// Recovery ran out of input before it could resume
    InputExhausted,
    /// The iteration limit was reached, which only cyclic tables cause
    Runaway,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
/// How a parse ended
pub enum Outcome {
    Accepted,
    Fatal(FatalKind),
}

#[derive(Debug, Clone, Serialize)]
/// The result of a parse: its trace, the errors diagnosed, and how it ended
pub struct Parse {
    pub trace: Vec<TraceEntry>,
    pub errors: Vec<ErrorRecord>,
    pub outcome: Outcome,
    pub iterations: usize,
}

impl Parse {
    /// Returns true if the parser reached an accept action, possibly after
    /// recovering from errors
    pub fn accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    /// Returns true if the input was accepted without any errors
    pub fn is_clean(&self) -> bool {
        self.accepted() && self.errors.is_empty()
    }
}

/// An LR parsing automaton driven by precomputed tables
pub struct Parser<'t> {
    tables: &'t Tables,
    config: ParserConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Recovering from an error diagnosed at the trigger position, which has
    /// already been recorded
    Panic { trigger: usize },
}

/// The state of a single parse
struct Run<'t> {
    tables: &'t Tables,
    config: &'t ParserConfig,
    stack: Stack,
    reader: Reader,
    recorder: Recorder,
    mode: Mode,
    iterations: usize,
}

impl<'t> Parser<'t> {
    /// Creates a parser with the default configuration
    pub fn new(tables: &'t Tables) -> Parser<'t> {
        Parser::with_config(tables, ParserConfig::default())
    }

    /// Creates a parser with the given configuration
    pub fn with_config(tables: &'t Tables, config: ParserConfig) -> Parser<'t> {
        Parser { tables, config }
    }

    /// Returns the parser's configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Tokenizes and parses an input string. Errors in the input are
    /// reported in the returned parse; an Err means the tables are
    /// malformed.
    pub fn parse(&self, input: &str) -> Result<Parse> {
        let lexemes = lexer::tokenize(input);
        let locations: Vec<Position> = lexemes.iter().map(|l| l.position).collect();
        let tape = lexemes.into_iter().map(|l| l.text).collect();

        self.run(tape, locations)
    }

    /// Parses an already tokenized input tape
    pub fn parse_tape(&self, tape: Vec<String>) -> Result<Parse> {
        self.run(tape, Vec::new())
    }

    fn run(&self, tape: Vec<String>, locations: Vec<Position>) -> Result<Parse> {
        let mut run = Run {
            tables: self.tables,
            config: &self.config,
            stack: Stack::new(),
            reader: Reader::new(tape),
            recorder: Recorder::new(locations),
            mode: Mode::Normal,
            iterations: 0,
        };

        run.recorder.step(
            StepKind::Start,
            "Parsing started".to_string(),
            &["The syntax analysis is about to begin."],
            &run.stack,
            &run.reader,
        );

        let outcome = run.drive()?;
        info!(
            "parse finished with {:?} after {} iterations and {} errors",
            outcome,
            run.iterations,
            run.recorder.errors.len()
        );

        Ok(Parse {
            trace: run.recorder.entries,
            errors: run.recorder.errors,
            outcome,
            iterations: run.iterations.min(MAX_ITERATIONS),
        })
    }
}

impl Run<'_> {
    /// Runs the automaton until it accepts or gives up
    fn drive(&mut self) -> Result<Outcome> {
        // Algorithm adapted from Aho et al (2007) p.251, with panic-mode
        // recovery from p.278

        loop {
            self.iterations += 1;
            if self.iterations > MAX_ITERATIONS {
                return Ok(self.fatal(FatalKind::Runaway));
            }

            if self.stack.is_empty() {
                return Ok(self.fatal(FatalKind::StackEmptied));
            }

            if let Mode::Panic { trigger } = self.mode {
                if let Some(kind) = self.recover(trigger)? {
                    return Ok(self.fatal(kind));
                }
            }

            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    /// Performs the action for the lookahead in the current state
    fn step(&mut self) -> Result<Option<Outcome>> {
        let tables = self.tables;
        let Some(state) = self.stack.peek_state() else {
            return Ok(Some(self.fatal(FatalKind::StackEmptied)));
        };
        let token = self.reader.lookahead().to_string();

        if !tables.action.contains(&token) {
            return Ok(Some(self.fatal(FatalKind::UnknownToken)));
        }

        let action = tables.action.lookup(&token, state)?;
        debug!("ACTION[{}, {}] => {}", token, state, action);

        let found = format!("In column {} and row {} found the move: {}", token, state, action);
        self.recorder.step_marked(
            StepKind::Action,
            format!("ACTION[{}, {}] => {}", token, state, action),
            &["Looked up the action table.", found.as_str()],
            &self.stack,
            &self.reader,
            Some((token.clone(), state)),
        );

        match action {
            Action::Shift(next) => {
                self.stack.push(&token, *next);
                self.reader.advance();
            }
            Action::Reduce(production) => {
                if !self.stack.pop_n(production.len()) {
                    return Err(Error::StackUnderflow(production.head.clone()));
                }

                let exposed = self
                    .stack
                    .peek_state()
                    .ok_or_else(|| Error::StackUnderflow(production.head.clone()))?;
                let next = tables.goto.goto(&production.head, exposed)?;
                self.stack.push(&production.head, next);
                debug!("GOTO[{}, {}] => {}", production.head, exposed, next);

                let reduced = format!(
                    "Reduced by {}, popping {} symbols.",
                    production,
                    production.len()
                );
                self.recorder.step_marked(
                    StepKind::Goto,
                    format!("GOTO[{}, {}] => {}", production.head, exposed, next),
                    &[reduced.as_str(), "Looked up the goto table."],
                    &self.stack,
                    &self.reader,
                    Some((production.head.clone(), exposed)),
                );
            }
            Action::Accept => {
                self.recorder.step(
                    StepKind::Accepted,
                    "The input was accepted!".to_string(),
                    &["Accepted"],
                    &self.stack,
                    &self.reader,
                );
                return Ok(Some(Outcome::Accepted));
            }
            Action::Error => {
                let message = build_error_message(&tables.action, state, &token);
                warn!("syntax error at {}: {}", self.reader.cursor(), message);

                self.recorder
                    .error(ErrorKind::Syntactic, &self.reader, message.clone());
                self.recorder.step(
                    StepKind::PanicEntered,
                    format!("{}. Entering panic mode.", message),
                    &[
                        message.as_str(),
                        "The parser will discard symbols until it reaches a synchronization point.",
                    ],
                    &self.stack,
                    &self.reader,
                );
                self.mode = Mode::Panic {
                    trigger: self.reader.cursor(),
                };
            }
        }

        Ok(None)
    }

    /// Discards input until a synchronizing symbol, then pops states until
    /// one has a valid action for it. Returns the reason for giving up, if
    /// recovery fails.
    fn recover(&mut self, trigger: usize) -> Result<Option<FatalKind>> {
        let tables = self.tables;

        loop {
            let Some(state) = self.stack.peek_state() else {
                return Ok(Some(FatalKind::StackEmptied));
            };
            let token = self.reader.lookahead().to_string();
            let known = tables.action.contains(&token);

            if known && tables.action.lookup(&token, state)?.is_valid() {
                debug!("recovered at '{}' in state {}", token, state);
                self.recorder.step(
                    StepKind::Recovered,
                    format!("Recovery complete at '{}'.", token),
                    &["The current token can be consumed by the state on top of the stack."],
                    &self.stack,
                    &self.reader,
                );
                self.mode = Mode::Normal;
                return Ok(None);
            }

            if !known || !self.config.is_sync(&token) {
                debug!("discarding '{}' at {}", token, self.reader.cursor());
                self.recorder.step(
                    StepKind::Discarded,
                    format!("Discarding symbol '{}' to recover.", token),
                    &["This symbol cannot be consumed by the current state."],
                    &self.stack,
                    &self.reader,
                );

                if self.reader.cursor() != trigger {
                    self.recorder.error(
                        ErrorKind::Syntactic,
                        &self.reader,
                        build_error_message(&tables.action, state, &token),
                    );
                }

                if !self.reader.advance() {
                    return Ok(Some(FatalKind::InputExhausted));
                }
                continue;
            }

            self.stack.pop();
            debug!("popped state {} synchronizing on '{}'", state, token);
            self.recorder.step(
                StepKind::Pruned,
                format!("Popped state {} while synchronizing on '{}'.", state, token),
                &["The state cannot act on the synchronizing symbol."],
                &self.stack,
                &self.reader,
            );

            if self.stack.is_empty() {
                return Ok(Some(if token == END_MARKER {
                    FatalKind::InputExhausted
                } else {
                    FatalKind::StackEmptied
                }));
            }
        }
    }

    /// Records a fatal error for the lexeme under the cursor and returns the
    /// corresponding outcome
    fn fatal(&mut self, kind: FatalKind) -> Outcome {
        let token = self.reader.lookahead().to_string();
        let (step, details, message) = match kind {
            FatalKind::UnknownToken => (
                "The input was rejected due to a lexical error!",
                vec![
                    format!("The input has a lexical error at: {}.", token),
                    "The token does not belong to the grammar of the source language.".to_string(),
                ],
                format!("lexical error: unknown token '{}'", token),
            ),
            FatalKind::StackEmptied => (
                "Fatal error: could not synchronize.",
                vec!["The stack emptied without reaching a valid state.".to_string()],
                "fatal: stack emptied during recovery".to_string(),
            ),
            FatalKind::InputExhausted => (
                "Fatal error: input exhausted during recovery.",
                vec!["No synchronizing symbol could be reached.".to_string()],
                "fatal: input exhausted during recovery".to_string(),
            ),
            FatalKind::Runaway => (
                "Fatal error: iteration limit exceeded.",
                vec!["The tables led the parser around a cycle.".to_string()],
                format!("fatal: iteration limit of {} exceeded", MAX_ITERATIONS),
            ),
        };
        let (step_kind, error_kind) = match kind {
            FatalKind::UnknownToken => (StepKind::LexicalError, ErrorKind::Lexical),
            _ => (StepKind::Fatal, ErrorKind::Fatal),
        };

        warn!("{} at {}", message, self.reader.cursor());
        let details: Vec<&str> = details.iter().map(String::as_str).collect();
        self.recorder.step(
            step_kind,
            step.to_string(),
            &details,
            &self.stack,
            &self.reader,
        );
        self.recorder.error(error_kind, &self.reader, message);

        Outcome::Fatal(kind)
    }
}
