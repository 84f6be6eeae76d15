//! Run configuration for the koans CLI
//!
//! Built from command-line arguments; every field has a sensible default so `koans` with no
//! arguments walks the whole curriculum and prints the plain-text report.

use clap::ValueEnum;
use koans_core::KoanGroup;
use thiserror::Error;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One `<group> - <koan>: <status>` line per koan, then a summary line
    #[default]
    Text,
    /// One JSON object per line (`"event": "result"` per koan, then `"event": "summary"`)
    Json,
}

/// When to color status words in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve the choice against whether stdout is a terminal.
    pub fn enabled(self, stdout_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => stdout_is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Configuration for a single `koans` invocation
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Output format for results
    pub format: OutputFormat,
    /// Color choice for text output
    pub color: ColorChoice,
    /// Show check durations
    pub verbose: bool,
    /// Only run these groups (case-insensitive); empty means all
    pub groups: Vec<String>,
    /// Print the plan instead of running it
    pub list_only: bool,
}

impl RunConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the color choice
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Show durations in the text report
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Restrict the run to the named groups
    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Only print the plan
    pub fn with_list_only(mut self, list_only: bool) -> Self {
        self.list_only = list_only;
        self
    }
}

// ============================================================================
// Group selection
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no koan group named '{name}' (available: {available})")]
    UnknownGroup { name: String, available: String },
}

/// Keep only the requested groups, in discovery order.
///
/// An empty `wanted` list keeps everything. Names match case-insensitively; every requested name must
/// match some group.
pub fn select_groups(groups: Vec<KoanGroup>, wanted: &[String]) -> Result<Vec<KoanGroup>, SelectionError> {
    if wanted.is_empty() {
        return Ok(groups);
    }

    if let Some(unknown) = wanted
        .iter()
        .find(|w| !groups.iter().any(|g| g.name().eq_ignore_ascii_case(w)))
    {
        let available: Vec<&str> = groups.iter().map(|g| g.name()).collect();
        return Err(SelectionError::UnknownGroup {
            name: unknown.clone(),
            available: available.join(", "),
        });
    }

    Ok(groups
        .into_iter()
        .filter(|g| wanted.iter().any(|w| g.name().eq_ignore_ascii_case(w)))
        .collect())
}
