//! CLI Module
//!
//! Exit codes and error classification for the command-line tool.

pub mod exit_codes;

pub use exit_codes::{exit_code_description, print_exit_codes, CliResult, ExitCodes};
