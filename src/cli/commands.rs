//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, IsTerminal, Write};
use std::panic;

use koans_core::{KoanDeclaration, KoanGroup, RunResult, Summary, discover, run_with, summarize};

use super::config::{OutputFormat, RunConfig, select_groups};
use super::reporter::{ConsoleReporter, JsonReporter, KoanReporter, write_plan};
use super::{CliError, CliResult, ExitCode};

/// Discover, run, summarize and print to stdout.
pub fn run_koans(declarations: Vec<KoanDeclaration>, config: &RunConfig) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let color = config.color.enabled(stdout.is_terminal());
    run_koans_to(declarations, config, color, stdout.lock())
}

/// Same as [`run_koans`], writing the report to `out`.
///
/// ## Returns
/// - `ExitCode::SUCCESS` when enlightened (or when only listing), `ExitCode::FAILURE` otherwise.
///
/// ## Errors
/// - A configuration error (exit code 2), rendered as a diagnostic. No koan runs.
/// - An unknown `--group` name, or a write failure on `out`.
pub fn run_koans_to<W: Write>(
    declarations: Vec<KoanDeclaration>,
    config: &RunConfig,
    color: bool,
    mut out: W,
) -> CliResult<ExitCode> {
    let groups = discover(declarations).map_err(|e| {
        let diagnostic = miette::Report::new(e);
        CliError::new(format!("{:?}", diagnostic), ExitCode::CONFIGURATION)
    })?;
    let groups = select_groups(groups, &config.groups).map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    if config.list_only {
        write_plan(&mut out, &groups).map_err(write_error)?;
        return Ok(ExitCode::SUCCESS);
    }

    let summary = match config.format {
        OutputFormat::Text => {
            let mut reporter = ConsoleReporter::new(out, config.verbose, color);
            let summary = report(&groups, &mut reporter);
            reporter.finish().map_err(write_error)?;
            summary
        }
        OutputFormat::Json => {
            let mut reporter = JsonReporter::new(out);
            let summary = report(&groups, &mut reporter);
            reporter.finish().map_err(write_error)?;
            summary
        }
    };

    if summary.is_enlightened() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Drive one run through a reporter.
fn report<R: KoanReporter>(groups: &[KoanGroup], reporter: &mut R) -> Summary {
    reporter.on_collection_complete(groups);
    let results = run_quietly(groups, reporter);
    let summary = summarize(&results);
    reporter.on_run_complete(&summary);
    summary
}

/// Run with the default panic hook swapped out, so a panicking koan shows up once (as its FAIL line)
/// instead of also dumping a panic message to stderr.
fn run_quietly<R: KoanReporter>(groups: &[KoanGroup], reporter: &mut R) -> Vec<RunResult> {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "koan panicked");
    }));
    let results = run_with(groups, reporter);
    panic::set_hook(previous);
    results
}

fn write_error(e: io::Error) -> CliError {
    CliError::failure(format!("Error writing report: {}", e))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use koans_core::assert::fail;

    use super::*;

    fn render(declarations: Vec<KoanDeclaration>, config: &RunConfig) -> (CliResult<ExitCode>, String) {
        let mut out = Vec::new();
        let result = run_koans_to(declarations, config, false, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_enlightened_run_exits_zero() {
        let (result, out) = render(
            vec![KoanDeclaration::new("Arrays", 1, "creating_arrays", || Ok(()))],
            &RunConfig::default(),
        );
        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert!(out.contains("Arrays - creating_arrays: PASS"));
        assert!(out.ends_with("enlightened: yes\n"));
    }

    #[test]
    fn test_failure_exits_one() {
        let (result, out) = render(
            vec![
                KoanDeclaration::new("Arrays", 1, "broken", || fail("fill me in")),
                KoanDeclaration::new("Arrays", 2, "later", || Ok(())),
            ],
            &RunConfig::default(),
        );
        assert_eq!(result.unwrap(), ExitCode::FAILURE);
        assert!(out.contains("Arrays - broken: FAIL: fill me in"));
        assert!(out.contains("Arrays - later: SKIP"));
        assert!(out.contains("Meditate next on: Arrays - broken"));
    }

    #[test]
    fn test_configuration_error_exits_two_and_prints_nothing() {
        let (result, out) = render(
            vec![KoanDeclaration::untagged("loose", || Ok(())).in_group("Arrays")],
            &RunConfig::default(),
        );
        let err = result.unwrap_err();
        assert_eq!(err.exit_code, ExitCode::CONFIGURATION);
        assert!(err.message.contains("Arrays - loose"), "{}", err.message);
        assert!(err.message.contains("koans::config::missing_ordinal"), "{}", err.message);
        assert!(out.is_empty());
    }

    #[test]
    fn test_list_only_runs_nothing() {
        let (result, out) = render(
            vec![
                KoanDeclaration::new("Arrays", 2, "second", || fail("must not run")),
                KoanDeclaration::new("Arrays", 1, "first", || fail("must not run")),
            ],
            &RunConfig::new().with_list_only(true),
        );
        assert_eq!(result.unwrap(), ExitCode::SUCCESS);
        assert_eq!(out, "Arrays\n  1. first\n  2. second\n");
    }

    #[test]
    fn test_unknown_group_is_an_error() {
        let (result, _) = render(
            vec![KoanDeclaration::new("Arrays", 1, "a", || Ok(()))],
            &RunConfig::new().with_groups(vec!["Closures".to_string()]),
        );
        let err = result.unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("no koan group named 'Closures'"));
    }

    #[test]
    fn test_panicking_koan_is_reported_as_failure() {
        let (result, out) = render(
            vec![KoanDeclaration::new("Arrays", 1, "panics", || panic!("the stack was empty"))],
            &RunConfig::default(),
        );
        assert_eq!(result.unwrap(), ExitCode::FAILURE);
        assert!(out.contains("Arrays - panics: FAIL: the stack was empty"));
    }
}
