pub mod args;
pub mod common;
pub mod output;
