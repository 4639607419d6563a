use clap::Parser as _;
use env_logger::{Builder, Env};
use lrtrace::analyze::{self, GridFile};
use lrtrace::cli::args::{Commands, Options};
use lrtrace::cli::{common, output};
use lrtrace::lexer;
use lrtrace::parsers::{Parser, ParserConfig};
use std::process::ExitCode;

fn main() -> std::result::Result<ExitCode, Box<dyn std::error::Error>> {
    let options = Options::parse();

    let level = match options.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    Builder::from_env(Env::default().default_filter_or(level)).init();

    match options.command {
        Commands::Tokens { input } => {
            print!("{}", output::format_lexemes(&lexer::tokenize(&input)));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse {
            tables,
            sync,
            json,
            input,
        } => {
            let tables = common::load_tables(&tables)?;
            let config = ParserConfig::new().with_sync_symbols(&sync);
            let parse = Parser::with_config(&tables, config).parse(&input)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&parse)?);
            } else {
                print!("{}", output::format_parse(&parse));
            }

            Ok(if parse.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Analyze {
            kind,
            grammar,
            grid,
            sync,
            input,
        } => {
            let config = ParserConfig::new().with_sync_symbols(&sync);
            let report =
                analyze::analyze_with_config(&GridFile::new(grid), &kind, &grammar, &input, config);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::from(report.error_code()))
        }
    }
}
