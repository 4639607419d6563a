use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
/// Failures outside the parser's own error-recovery contract, mostly caused
/// by malformed tables or grammars
pub enum Error {
    #[error("empty grammar")]
    EmptyGrammar,
    #[error("empty table grid")]
    EmptyGrid,
    #[error("invalid {table} cell '{cell}'")]
    InvalidCell { table: &'static str, cell: String },
    #[error("invalid state column '{0}'")]
    InvalidColumn(String),
    #[error("invalid grammar rule '{0}'")]
    InvalidRule(String),
    #[error("no action for terminal '{terminal}' in state {state}")]
    MissingAction { terminal: String, state: usize },
    #[error("no goto for non-terminal '{non_terminal}' in state {state}")]
    MissingGoto { non_terminal: String, state: usize },
    #[error("stack underflow reducing to '{0}'")]
    StackUnderflow(String),
    #[error("unknown analysis kind '{0}'")]
    UnknownAnalysisKind(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
