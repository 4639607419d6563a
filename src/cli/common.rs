use crate::errors::Result;
use crate::parsers::Tables;
use std::path::Path;

pub const LINE_LENGTH: usize = 72;

/// Reads tables in their JSON transport representation from a file
pub fn load_tables(path: &Path) -> Result<Tables> {
    Tables::from_json(&std::fs::read_to_string(path)?)
}

/// Joins the elements of a tape, bracketing the one under the cursor
pub fn format_tape(tape: &[String], cursor: usize) -> String {
    tape.iter()
        .enumerate()
        .map(|(i, s)| {
            if i == cursor {
                format!("[{}]", s)
            } else {
                s.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates a line to LINE_LENGTH characters, marking the truncation
pub fn fit_line(line: &str) -> String {
    if line.chars().count() <= LINE_LENGTH {
        return line.to_string();
    }

    let mut s: String = line.chars().take(LINE_LENGTH - 1).collect();
    s.push('…');
    s
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::test_file_path;

    #[test]
    fn test_format_tape() {
        let tape: Vec<String> = ["a", "b", "$"].iter().map(|s| s.to_string()).collect();
        assert_eq!(format_tape(&tape, 1), "a [b] $");
        assert_eq!(format_tape(&tape, 3), "a b $");
    }

    #[test]
    fn test_fit_line() {
        assert_eq!(fit_line("short"), "short");

        let long = "x".repeat(LINE_LENGTH + 10);
        let fitted = fit_line(&long);
        assert_eq!(fitted.chars().count(), LINE_LENGTH);
        assert!(fitted.ends_with('…'));
    }

    #[test]
    fn test_load_tables() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tables = load_tables(Path::new(&test_file_path("tables/stmts.json")))?;
        assert!(tables.action.contains(";"));
        assert!(load_tables(Path::new("/nonexistent/tables.json")).is_err());
        Ok(())
    }
}
