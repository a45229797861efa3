//! CLI module - argument parsing, interactive prompts and subcommands

mod args;
pub mod inspect;
mod prompts;

pub use args::{resolve_mapping, Cli, Commands};
pub use prompts::*;
