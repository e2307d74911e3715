//! CLI module - argument parsing, prompts and the demo generator

pub mod args;
pub mod generate;
pub mod prompts;

pub use args::{Cli, Commands};
pub use prompts::*;
