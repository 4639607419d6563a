use crate::errors::Result;
use crate::grammar::{self, AnalysisKind, Symbols};
use crate::parsers::{Parse, Parser, ParserConfig, Tables};
use log::{info, warn};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::path::PathBuf;

/// A source of action/goto tables for a grammar
pub trait TableGenerator {
    /// Returns the table for a normalized grammar as a grid of cells. The
    /// first row is a header naming each column's symbol, and each following
    /// row is a state. The first column holds state labels.
    fn generate(&self, grammar: &str, kind: AnalysisKind) -> Result<Vec<Vec<String>>>;
}

/// A table generator which reads a previously exported grid from a JSON
/// file, whatever the grammar
pub struct GridFile {
    path: PathBuf,
}

impl GridFile {
    pub fn new(path: impl Into<PathBuf>) -> GridFile {
        GridFile { path: path.into() }
    }
}

impl TableGenerator for GridFile {
    fn generate(&self, grammar: &str, kind: AnalysisKind) -> Result<Vec<Vec<String>>> {
        info!(
            "reading {} table for '{}' from {}",
            kind,
            grammar,
            self.path.display()
        );
        let text = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// A table generator returning a fixed grid
pub struct StaticGrid(pub Vec<Vec<String>>);

impl TableGenerator for StaticGrid {
    fn generate(&self, _grammar: &str, _kind: AnalysisKind) -> Result<Vec<Vec<String>>> {
        Ok(self.0.clone())
    }
}

/// The products of a successful analysis
#[derive(Debug)]
pub struct Analysis {
    pub tables: Tables,
    pub parse: Parse,
    /// The rules of the normalized grammar
    pub grammar: Vec<String>,
}

/// The response to an analysis request
#[derive(Debug)]
pub enum Report {
    Success(Analysis),
    Failure { message: String },
}

impl Report {
    /// Returns the error code reported to clients: 0 on success, 1 on failure
    pub fn error_code(&self) -> u8 {
        match self {
            Report::Success(_) => 0,
            Report::Failure { .. } => 1,
        }
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Report::Success(analysis) => {
                let mut s = serializer.serialize_struct("Report", 6)?;
                s.serialize_field("ERROR_CODE", &self.error_code())?;
                s.serialize_field("parsingTable", &analysis.tables)?;
                s.serialize_field("stepsParsing", &analysis.parse.trace)?;
                s.serialize_field("errors", &analysis.parse.errors)?;
                s.serialize_field("grammar", &analysis.grammar)?;
                s.serialize_field("outcome", &analysis.parse.outcome)?;
                s.end()
            }
            Report::Failure { message } => {
                let mut s = serializer.serialize_struct("Report", 2)?;
                s.serialize_field("ERROR_CODE", &self.error_code())?;
                s.serialize_field("errorMessage", message)?;
                s.end()
            }
        }
    }
}

/// Analyzes an input with the tables a generator produces for a grammar,
/// using the default synchronizing symbols. Every failure, including
/// malformed grammars and tables, is returned as a failure report.
pub fn analyze<G>(generator: &G, kind: &str, grammar: &str, input: &str) -> Report
where
    G: TableGenerator + ?Sized,
{
    analyze_with_config(generator, kind, grammar, input, ParserConfig::default())
}

/// Analyzes an input as analyze does, parsing with the given configuration
pub fn analyze_with_config<G>(
    generator: &G,
    kind: &str,
    grammar: &str,
    input: &str,
    config: ParserConfig,
) -> Report
where
    G: TableGenerator + ?Sized,
{
    match run_analysis(generator, kind, grammar, input, config) {
        Ok(analysis) => Report::Success(analysis),
        Err(e) => {
            warn!("analysis failed: {}", e);
            Report::Failure {
                message: format!("analysis failed: {}", e),
            }
        }
    }
}

fn run_analysis<G>(
    generator: &G,
    kind: &str,
    grammar: &str,
    input: &str,
    config: ParserConfig,
) -> Result<Analysis>
where
    G: TableGenerator + ?Sized,
{
    let kind: AnalysisKind = kind.parse()?;
    let normalized = grammar::normalize(grammar);
    let symbols = Symbols::extract(&normalized)?;

    let grid = generator.generate(&normalized, kind)?;
    let tables = Tables::from_grid(&grid, &symbols)?;
    let parse = Parser::with_config(&tables, config).parse(input)?;

    Ok(Analysis {
        tables,
        parse,
        grammar: grammar::productions(&normalized),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parsers::StepKind;
    use crate::test::test_file_path;

    /// LR(0) grid for S → a b
    fn ab_grid() -> StaticGrid {
        StaticGrid(
            [
                ["", "a", "b", "$", "S"],
                ["0", "s2", "", "", "1"],
                ["1", "", "", "acc", ""],
                ["2", "", "s3", "", ""],
                ["3", "", "", "r(S -> a b)", ""],
            ]
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect(),
        )
    }

    #[test]
    fn test_analyze_success() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let report = analyze(&ab_grid(), "slr1", "S->a b", "a b");
        let Report::Success(analysis) = &report else {
            panic!("analysis failed: {:?}", report);
        };

        assert!(analysis.parse.is_clean());
        assert_eq!(analysis.grammar, vec!["S->a b"]);
        assert_eq!(
            analysis.parse.trace.last().map(|e| e.kind),
            Some(StepKind::Accepted)
        );

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["ERROR_CODE"], 0);
        assert_eq!(json["grammar"], serde_json::json!(["S->a b"]));
        assert_eq!(json["parsingTable"]["action_table"]["a"]["0"], "s2");
        assert_eq!(json["parsingTable"]["action_table"]["$"]["3"], "r(S -> a b)");
        assert_eq!(json["parsingTable"]["goto_table"]["S"]["0"], 1);
        assert_eq!(
            json["parsingTable"]["terminals_nonterminals"]["terminals"],
            serde_json::json!(["a", "b"])
        );
        assert_eq!(json["errors"], serde_json::json!([]));
        assert_eq!(json["outcome"], "accepted");

        Ok(())
    }

    #[test]
    fn test_analyze_failures() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let report = analyze(&ab_grid(), "lr2", "S->a b", "a b");
        assert_eq!(report.error_code(), 1);

        let json = serde_json::to_value(&report)?;
        assert_eq!(json["ERROR_CODE"], 1);
        assert_eq!(
            json["errorMessage"],
            "analysis failed: unknown analysis kind 'lr2'"
        );

        let report = analyze(&ab_grid(), "slr1", "S a b", "a b");
        assert!(matches!(report, Report::Failure { .. }));

        let report = analyze(&GridFile::new("/nonexistent/grid.json"), "slr1", "S->a b", "a");
        assert!(matches!(report, Report::Failure { .. }));

        Ok(())
    }

    #[test]
    fn test_grid_file() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let generator = GridFile::new(test_file_path("grids/expr.json"));
        let grid = generator.generate("E->E + T | T.T->id.", AnalysisKind::Slr1)?;
        assert_eq!(grid[0][1], "id");
        Ok(())
    }
}
