pub mod analyze;
pub mod cli;
pub mod errors;
pub mod grammar;
pub mod lexer;
pub mod parsers;
pub mod position;

#[cfg(test)]
mod test {
    use crate::parsers::{Action, Tables};

    /// Helper function to build tables for S → a b. Shifting 'a' from state 0
    /// reaches state 1, shifting 'b' from state 1 reaches state 2, and state
    /// 2 accepts on end of input.
    pub fn ab_tables() -> Tables {
        let mut tables = Tables::default();
        for (terminal, row) in [
            ("a", [Action::Shift(1), Action::Error, Action::Error]),
            ("b", [Action::Error, Action::Shift(2), Action::Error]),
            ("$", [Action::Error, Action::Error, Action::Accept]),
        ] {
            for (state, action) in row.into_iter().enumerate() {
                tables.action.insert(terminal, state, action);
            }
        }
        tables
    }

    /// Helper function to build an absolute path to a test data file
    pub fn test_file_path(filename: &str) -> String {
        let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        p.push(format!("tests/testdata/{}", filename));

        p.into_os_string()
            .into_string()
            .expect("failed to build filename")
    }
}
