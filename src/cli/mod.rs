//! CLI module for the koan runner
//!
//! This module provides the command-line interface.
//!
//! ## Usage
//!
//! - `koans` - discover, run and summarize the whole curriculum
//! - `koans --group Arrays` - only walk the named group(s)
//! - `koans --list` - print the plan without running anything
//! - `koans --format json` - one JSON object per line
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `config` - Run configuration and group selection
//! - `reporter` - Console and JSON reporters
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod config;
pub mod reporter;

use std::fmt;
use std::process;

use clap::Parser;

use crate::curriculum;
use config::{ColorChoice, OutputFormat, RunConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    /// Every koan passed.
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// At least one koan failed or was skipped, or the CLI itself failed.
    pub const FAILURE: ExitCode = ExitCode(1);
    /// A koan declaration was incomplete; nothing ran.
    pub const CONFIGURATION: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Walk the path to enlightenment, one koan at a time
#[derive(Parser, Debug)]
#[command(name = "koans")]
#[command(version = VERSION)]
#[command(about = "Walk the path to enlightenment, one koan at a time", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only run this group (repeatable, case-insensitive)
    #[arg(long = "group", value_name = "NAME")]
    pub groups: Vec<String>,

    /// Print the execution plan without running any koan
    #[arg(long)]
    pub list: bool,

    /// Show how long each koan took
    #[arg(short, long)]
    pub verbose: bool,

    /// Color the status words
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

impl Cli {
    /// Translate parsed arguments into a run configuration.
    pub fn to_config(&self) -> RunConfig {
        RunConfig::new()
            .with_format(self.format)
            .with_color(self.color)
            .with_verbose(self.verbose)
            .with_groups(self.groups.clone())
            .with_list_only(self.list)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.to_config();
    tracing::debug!(?config, "starting koan run");
    commands::run_koans(curriculum::declarations(), &config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_arguments() {
        let cli = Cli::try_parse_from(["koans"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(cli.groups.is_empty());
        assert!(!cli.list);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_groups() {
        let cli = Cli::try_parse_from(["koans", "--group", "Arrays", "--group", "inheritance"]).unwrap();
        assert_eq!(cli.groups, vec!["Arrays".to_string(), "inheritance".to_string()]);
    }

    #[test]
    fn test_cli_parse_format_and_color() {
        let cli = Cli::try_parse_from(["koans", "--format", "json", "--color", "never", "-v"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["koans", "--format", "tap"]).is_err());
    }

    #[test]
    fn test_cli_to_config() {
        let cli = Cli::try_parse_from(["koans", "--list", "--group", "Arrays"]).unwrap();
        let config = cli.to_config();
        assert!(config.list_only);
        assert_eq!(config.groups, vec!["Arrays".to_string()]);
    }
}
