//! CLI module - argument parsing, prompts and command handlers

pub mod analyze;
pub mod args;
pub mod calculate;
pub mod clean;
pub mod defects;
pub mod prompts;

pub use args::{clean_output_path, Cli, Commands, DefectCommand, DefectFields};
pub use prompts::*;
