use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Command line options for the lrtrace tool
pub struct Options {
    /// Log more detail; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
/// Commands for the lrtrace tool
pub enum Commands {
    /// Print the lexemes of an input
    Tokens { input: String },
    /// Parse an input with tables exported as JSON
    Parse {
        #[arg(long)]
        tables: PathBuf,

        /// Additional synchronizing symbol for error recovery
        #[arg(long = "sync")]
        sync: Vec<String>,

        /// Print the parse as JSON rather than text
        #[arg(long)]
        json: bool,

        input: String,
    },
    /// Run a full analysis with a grid exported by a table generator
    Analyze {
        /// One of ll1, lr0, slr1, lalr1 or lr1
        #[arg(long)]
        kind: String,

        #[arg(long)]
        grammar: String,

        #[arg(long)]
        grid: PathBuf,

        /// Additional synchronizing symbol for error recovery
        #[arg(long = "sync")]
        sync: Vec<String>,

        input: String,
    },
}
