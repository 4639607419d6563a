mod expected;
pub mod lr;
mod reader;
mod stack;
pub mod table;
pub mod trace;

pub use expected::{build_error_message, expected_terminals};
pub use lr::{FatalKind, Outcome, Parse, Parser, ParserConfig, MAX_ITERATIONS};
pub use table::{Action, ActionTable, GotoTable, Tables};
pub use trace::{ErrorKind, ErrorRecord, StepKind, TraceEntry};
