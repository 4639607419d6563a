use super::common;
use crate::lexer::Lexeme;
use crate::parsers::{ErrorRecord, Outcome, Parse};

/// Formats lexemes one per line, with their positions
pub fn format_lexemes(lexemes: &[Lexeme]) -> String {
    lexemes.iter().map(|l| format!("{}\n", l)).collect()
}

/// Formats a parse as a numbered trace, followed by its errors and verdict
pub fn format_parse(parse: &Parse) -> String {
    let width = parse.trace.len().to_string().len();
    let mut out = String::new();

    for (i, entry) in parse.trace.iter().enumerate() {
        for step in &entry.steps {
            out.push_str(&common::fit_line(&format!("{:>w$}  {}", i, step, w = width)));
            out.push('\n');
        }

        let indent = " ".repeat(width + 2);
        out.push_str(&common::fit_line(&format!(
            "{}stack: {}",
            indent,
            entry.stack.join(" ")
        )));
        out.push('\n');
        out.push_str(&common::fit_line(&format!(
            "{}input: {}",
            indent,
            common::format_tape(&entry.input, entry.pointer)
        )));
        out.push('\n');
    }

    for error in &parse.errors {
        out.push_str(&format_error(error));
        out.push('\n');
    }

    out.push_str(&verdict(parse));
    out.push('\n');
    out
}

/// Formats an error record with its tape index and, if known, its source
/// position
fn format_error(error: &ErrorRecord) -> String {
    match error.location {
        Some(location) => format!(
            "error at {} ({}): {}",
            error.position, location, error.message
        ),
        None => format!("error at {}: {}", error.position, error.message),
    }
}

/// Returns a one-line summary of how a parse ended
pub fn verdict(parse: &Parse) -> String {
    match parse.outcome {
        Outcome::Accepted if parse.errors.is_empty() => "accepted".to_string(),
        Outcome::Accepted => format!("accepted after {} errors", parse.errors.len()),
        Outcome::Fatal(kind) => format!("rejected ({:?})", kind),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parsers::Parser;
    use crate::test::ab_tables;

    #[test]
    fn test_format_lexemes() {
        assert_eq!(format_lexemes(&tokenize("a +\nb")), "1:1 'a'\n1:3 '+'\n2:1 'b'\n");
    }

    #[test]
    fn test_format_parse() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tables = ab_tables();
        let text = format_parse(&Parser::new(&tables).parse("a b")?);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "0  Parsing started");
        assert_eq!(lines[1], "   stack: 0");
        assert_eq!(lines[2], "   input: [a] b $");
        assert_eq!(lines[3], "1  ACTION[a, 0] => s1");
        assert_eq!(lines.last(), Some(&"accepted"));

        Ok(())
    }

    #[test]
    fn test_format_rejected() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tables = ab_tables();
        let text = format_parse(&Parser::new(&tables).parse("a c")?);

        assert!(text.contains("error at 1 (1:3): lexical error: unknown token 'c'\n"));
        assert!(text.ends_with("rejected (UnknownToken)\n"));

        Ok(())
    }
}
