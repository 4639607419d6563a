mod common;

use lrtrace::analyze::{analyze, analyze_with_config, GridFile, Report};
use lrtrace::parsers::{FatalKind, Outcome, ParserConfig, StepKind};

const EXPR_GRAMMAR: &str = "E -> E + T | T.\nT -> id.";

#[test]
fn test_analyze_expression() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let generator = GridFile::new(common::test_file_path("grids/expr.json"));
    let report = analyze(&generator, "SLR1", EXPR_GRAMMAR, "id + id");

    let Report::Success(analysis) = &report else {
        panic!("analysis failed: {:?}", report);
    };
    assert!(analysis.parse.is_clean());
    assert_eq!(
        analysis.parse.trace.last().map(|e| e.kind),
        Some(StepKind::Accepted)
    );

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["ERROR_CODE"], 0);
    assert_eq!(json["parsingTable"]["goto_table"]["T"]["4"], 5);
    assert_eq!(json["stepsParsing"][0]["stepByStep"][0], "Parsing started");

    Ok(())
}

#[test]
fn test_analyze_recovers() {
    let generator = GridFile::new(common::test_file_path("grids/expr.json"));
    let report = analyze(&generator, "slr1", EXPR_GRAMMAR, "id + + id");

    let Report::Success(analysis) = report else {
        panic!("analysis failed");
    };
    assert_eq!(analysis.parse.outcome, Outcome::Accepted);
    assert_eq!(analysis.parse.errors.len(), 1);
    assert_eq!(analysis.parse.errors[0].position, 2);
    assert_eq!(
        analysis.grammar,
        vec!["E-> E + T | T".to_string(), "T-> id".to_string()]
    );
}

#[test]
fn test_analyze_bad_grid() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let generator = GridFile::new(common::test_file_path("tables/stmts.json"));
    let report = analyze(&generator, "slr1", EXPR_GRAMMAR, "id");

    assert_eq!(report.error_code(), 1);
    let json = serde_json::to_value(&report)?;
    assert!(json["errorMessage"]
        .as_str()
        .is_some_and(|m| m.starts_with("analysis failed: ")));

    Ok(())
}

#[test]
fn test_analyze_with_sync_symbol() {
    let generator = GridFile::new(common::test_file_path("grids/expr.json"));

    // By default '+' is discarded and parsing resumes at 'id'
    let Report::Success(analysis) = analyze(&generator, "slr1", EXPR_GRAMMAR, "+ id") else {
        panic!("analysis failed");
    };
    assert_eq!(analysis.parse.outcome, Outcome::Accepted);
    assert_eq!(analysis.parse.errors.len(), 1);

    let config = ParserConfig::new().with_sync_symbol("+");
    let Report::Success(analysis) =
        analyze_with_config(&generator, "slr1", EXPR_GRAMMAR, "+ id", config)
    else {
        panic!("analysis failed");
    };
    assert_eq!(analysis.parse.outcome, Outcome::Fatal(FatalKind::StackEmptied));
    assert_eq!(analysis.parse.errors.len(), 2);
}
