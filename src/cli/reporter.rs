//! Koan reporters
//!
//! ## KoanReporter Trait
//!
//! Reporters receive results while the run is still going (they are [`RunObserver`]s) so the learner
//! sees each koan as soon as it finishes. Implement [`KoanReporter`] for another output format.
//!
//! Two reporters ship with the CLI:
//! - [`ConsoleReporter`]: the plain-text report (`<group> - <koan>: PASS|FAIL: reason|SKIP`)
//! - [`JsonReporter`]: one JSON object per line
//!
//! Both write to any `io::Write`. Write errors do not interrupt the run; the first one is kept and
//! returned by `finish`.

use std::io::{self, Write};

use koans_core::{KoanGroup, Outcome, RunObserver, RunResult, Summary};
use serde::Serialize;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";

// ============================================================================
// Reporter trait
// ============================================================================

/// A [`RunObserver`] that also hears about collection and the final summary.
pub trait KoanReporter: RunObserver {
    /// Called once discovery (and group selection) is done, before any koan runs
    fn on_collection_complete(&mut self, _groups: &[KoanGroup]) {}

    /// Called after the last koan
    fn on_run_complete(&mut self, summary: &Summary);
}

// ============================================================================
// Plain text
// ============================================================================

/// Plain-text reporter.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
    color: bool,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, verbose: bool, color: bool) -> Self {
        Self {
            out,
            verbose,
            color,
            error: None,
        }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_line(&mut self, line: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> RunObserver for ConsoleReporter<W> {
    fn on_result(&mut self, result: &RunResult) {
        let line = format_result_line(result, self.verbose, self.color);
        self.write_line(&line);
    }
}

impl<W: Write> KoanReporter for ConsoleReporter<W> {
    fn on_run_complete(&mut self, summary: &Summary) {
        self.write_line("");
        self.write_line(&format_summary_line(summary));
        if let Some((group, name)) = &summary.next_koan {
            self.write_line(&format!("Meditate next on: {} - {}", group, name));
        }
    }
}

/// Render one result as `<group> - <koan>: <status>`.
///
/// Continuation lines of a multi-line failure reason are indented by four spaces.
pub fn format_result_line(result: &RunResult, verbose: bool, color: bool) -> String {
    let paint = |text: &str, code: &str| {
        if color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    };
    let timing = if verbose {
        format!(" ({}ms)", result.duration.as_millis())
    } else {
        String::new()
    };

    let status = match &result.outcome {
        Outcome::Passed => format!("{}{}", paint("PASS", GREEN), timing),
        Outcome::Failed(reason) => {
            format!("{}{}: {}", paint("FAIL", RED), timing, reason.replace('\n', "\n    "))
        }
        Outcome::Skipped => paint("SKIP", YELLOW),
    };

    format!("{} - {}: {}", result.group, result.name, status)
}

/// Render the summary line.
pub fn format_summary_line(summary: &Summary) -> String {
    format!(
        "{} passed, {} failed, {} skipped ({} total); enlightened: {}",
        summary.passed,
        summary.failed,
        summary.skipped,
        summary.total(),
        if summary.is_enlightened() { "yes" } else { "no" }
    )
}

/// Print the execution plan without running anything.
pub fn write_plan<W: Write>(out: &mut W, groups: &[KoanGroup]) -> io::Result<()> {
    for group in groups {
        writeln!(out, "{}", group.name())?;
        for unit in group.units() {
            writeln!(out, "  {}. {}", unit.ordinal(), unit.name())?;
        }
    }
    Ok(())
}

// ============================================================================
// JSON lines
// ============================================================================

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum JsonEvent<'a> {
    Result {
        group: &'a str,
        name: &'a str,
        ordinal: u32,
        status: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<&'a str>,
        duration_ms: u64,
    },
    Summary {
        passed: usize,
        failed: usize,
        skipped: usize,
        total: usize,
        enlightened: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        next_koan: Option<NextKoan<'a>>,
    },
}

#[derive(Serialize)]
struct NextKoan<'a> {
    group: &'a str,
    name: &'a str,
}

/// JSON-lines reporter.
pub struct JsonReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, event: &JsonEvent<'_>) {
        if self.error.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut self.out, event)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = written {
            self.error = Some(e);
        }
    }
}

impl<W: Write> RunObserver for JsonReporter<W> {
    fn on_result(&mut self, result: &RunResult) {
        let (status, reason) = match &result.outcome {
            Outcome::Passed => ("pass", None),
            Outcome::Failed(reason) => ("fail", Some(reason.as_str())),
            Outcome::Skipped => ("skip", None),
        };
        self.emit(&JsonEvent::Result {
            group: &result.group,
            name: &result.name,
            ordinal: result.ordinal,
            status,
            reason,
            duration_ms: u64::try_from(result.duration.as_millis()).unwrap_or(u64::MAX),
        });
    }
}

impl<W: Write> KoanReporter for JsonReporter<W> {
    fn on_run_complete(&mut self, summary: &Summary) {
        let next_koan = summary
            .next_koan
            .as_ref()
            .map(|(group, name)| NextKoan { group, name });
        self.emit(&JsonEvent::Summary {
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
            total: summary.total(),
            enlightened: summary.is_enlightened(),
            next_koan,
        });
    }
}
