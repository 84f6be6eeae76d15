//! Discover, run and summarize koans.
//!
//! The sequencer turns a flat registration list into a deterministic linear plan:
//!
//! 1. **Discover**: validate declarations, group them by topic (first appearance wins), and sort each
//!    group by ordinal with a stable sort.
//! 2. **Run**: execute groups in discovery order and units in ordinal order. The first failure in a
//!    group marks every later unit of that group as skipped without running it. Other groups are
//!    unaffected.
//! 3. **Summarize**: count outcomes and decide whether the learner is enlightened.
//!
//! ## Notes
//! - No IO happens here. Results are streamed to a [`RunObserver`] as they are produced.
//! - Execution is strictly sequential.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::errors::{AssertionFailure, ConfigurationError};
use crate::unit::{KoanDeclaration, KoanGroup, KoanUnit};

// ============================================================================
// Run results
// ============================================================================

/// What happened to a single koan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// The check's failure message, verbatim.
    Failed(String),
    /// An earlier unit of the same group failed; this check was never invoked.
    Skipped,
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped)
    }
}

/// The result of one koan in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub group: String,
    pub name: String,
    pub ordinal: u32,
    pub outcome: Outcome,
    /// Time spent in the check. Zero for skipped units.
    pub duration: Duration,
}

impl RunResult {
    fn skipped(unit: &KoanUnit) -> Self {
        Self {
            group: unit.group.clone(),
            name: unit.name.clone(),
            ordinal: unit.ordinal,
            outcome: Outcome::Skipped,
            duration: Duration::ZERO,
        }
    }
}

/// Receives results as the run progresses, in execution order.
pub trait RunObserver {
    /// Called before the first unit of a group runs (or is skipped).
    fn on_group_start(&mut self, _group: &KoanGroup) {}

    /// Called once per unit, immediately after its outcome is known.
    fn on_result(&mut self, result: &RunResult);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_result(&mut self, _result: &RunResult) {}
}

// ============================================================================
// Discovery
// ============================================================================

/// Validate declarations and build the ordered group list.
///
/// ## Parameters
/// - `declarations`: the registration list, in declaration order.
///
/// ## Returns
/// - (`Vec<KoanGroup>`): groups in order of first appearance, each sorted by ordinal ascending. Ties keep
///   declaration order.
///
/// ## Errors
/// - [`ConfigurationError`] for the first declaration without a group, without an ordinal, or with ordinal 0.
///   Nothing is returned for the remaining declarations.
#[tracing::instrument(skip_all)]
pub fn discover<I>(declarations: I) -> Result<Vec<KoanGroup>, ConfigurationError>
where
    I: IntoIterator<Item = KoanDeclaration>,
{
    let mut groups: Vec<KoanGroup> = Vec::new();

    for (declaration_index, decl) in declarations.into_iter().enumerate() {
        let (name, group, ordinal, check) = decl.into_parts();

        let Some(group) = group else {
            return Err(ConfigurationError::MissingGroup { name });
        };
        let Some(ordinal) = ordinal else {
            return Err(ConfigurationError::MissingOrdinal { group, name });
        };
        if ordinal == 0 {
            return Err(ConfigurationError::InvalidOrdinal { group, name, ordinal });
        }

        let unit = KoanUnit {
            name,
            group,
            ordinal,
            declaration_index,
            check,
        };

        match groups.iter_mut().find(|g| g.name == unit.group) {
            Some(existing) => existing.units.push(unit),
            None => groups.push(KoanGroup {
                name: unit.group.clone(),
                units: vec![unit],
            }),
        }
    }

    for group in &mut groups {
        // `sort_by_key` is stable: equal ordinals keep declaration order.
        group.units.sort_by_key(|u| u.ordinal);
        for pair in group.units.windows(2) {
            if pair[0].ordinal == pair[1].ordinal {
                tracing::debug!(
                    group = %group.name,
                    ordinal = pair[0].ordinal,
                    first = %pair[0].name,
                    second = %pair[1].name,
                    "duplicate ordinal, keeping declaration order"
                );
            }
        }
    }

    tracing::debug!(
        groups = groups.len(),
        units = groups.iter().map(KoanGroup::len).sum::<usize>(),
        "discovery complete"
    );
    Ok(groups)
}

// ============================================================================
// Execution
// ============================================================================

/// Run every group and collect the results.
pub fn run(groups: &[KoanGroup]) -> Vec<RunResult> {
    run_with(groups, &mut NoopObserver)
}

/// Run every group, streaming each result to `observer` as soon as it is known.
///
/// Within a group, the first failure (an `Err` from the check or a panic inside it) turns every later
/// unit of that group into [`Outcome::Skipped`]; those checks are never called. The next group starts
/// fresh.
#[tracing::instrument(skip_all, fields(group_count = groups.len()))]
pub fn run_with(groups: &[KoanGroup], observer: &mut dyn RunObserver) -> Vec<RunResult> {
    let mut results = Vec::with_capacity(groups.iter().map(KoanGroup::len).sum());

    for group in groups {
        observer.on_group_start(group);
        let mut blocked_by: Option<&str> = None;

        for unit in &group.units {
            let result = match blocked_by {
                Some(failed) => {
                    tracing::trace!(group = %group.name, koan = %unit.name, blocked_by = failed, "skipping");
                    RunResult::skipped(unit)
                }
                None => execute(unit),
            };
            if result.outcome.is_failed() {
                blocked_by = Some(unit.name.as_str());
            }
            observer.on_result(&result);
            results.push(result);
        }
    }

    results
}

fn execute(unit: &KoanUnit) -> RunResult {
    let start = Instant::now();
    let checked = panic::catch_unwind(AssertUnwindSafe(|| unit.check()));
    let duration = start.elapsed();

    let outcome = match checked {
        Ok(Ok(())) => Outcome::Passed,
        Ok(Err(failure)) => Outcome::Failed(failure.into_message()),
        Err(payload) => {
            let failure = AssertionFailure::from_panic(payload);
            tracing::debug!(group = %unit.group, koan = %unit.name, "check panicked: {}", failure);
            Outcome::Failed(failure.into_message())
        }
    };

    tracing::debug!(group = %unit.group, koan = %unit.name, ?outcome, "koan finished");
    RunResult {
        group: unit.group.clone(),
        name: unit.name.clone(),
        ordinal: unit.ordinal,
        outcome,
        duration,
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Aggregate view of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// First failed koan as `(group, name)`; the one to work on next.
    pub next_koan: Option<(String, String)>,
}

impl Summary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// True when every koan passed. An empty run is enlightened.
    pub fn is_enlightened(&self) -> bool {
        self.failed + self.skipped == 0
    }
}

/// Count outcomes across all results.
pub fn summarize(results: &[RunResult]) -> Summary {
    let mut summary = Summary::default();
    for result in results {
        match &result.outcome {
            Outcome::Passed => summary.passed += 1,
            Outcome::Failed(_) => {
                summary.failed += 1;
                if summary.next_koan.is_none() {
                    summary.next_koan = Some((result.group.clone(), result.name.clone()));
                }
            }
            Outcome::Skipped => summary.skipped += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::assert::{expect_eq, fail};
    use crate::unit::CheckResult;

    fn pass() -> CheckResult {
        Ok(())
    }

    fn outcomes(results: &[RunResult]) -> Vec<Outcome> {
        results.iter().map(|r| r.outcome.clone()).collect()
    }

    fn names(group: &KoanGroup) -> Vec<&str> {
        group.units().iter().map(KoanUnit::name).collect()
    }

    // ========================================
    // discover
    // ========================================

    #[test]
    fn test_discover_sorts_by_ordinal_not_declaration_order() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 3, "third", pass),
            KoanDeclaration::new("Arrays", 1, "first", pass),
            KoanDeclaration::new("Arrays", 2, "second", pass),
        ])
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_discover_groups_by_first_appearance() {
        let groups = discover(vec![
            KoanDeclaration::new("Inheritance", 1, "ancestor", pass),
            KoanDeclaration::new("Arrays", 1, "creating", pass),
            KoanDeclaration::new("Inheritance", 2, "object", pass),
        ])
        .unwrap();

        let group_names: Vec<_> = groups.iter().map(KoanGroup::name).collect();
        assert_eq!(group_names, vec!["Inheritance", "Arrays"]);
        assert_eq!(names(&groups[0]), vec!["ancestor", "object"]);
    }

    #[test]
    fn test_discover_does_not_reorder_groups_by_ordinal() {
        let groups = discover(vec![
            KoanDeclaration::new("Later", 9, "nine", pass),
            KoanDeclaration::new("Earlier", 1, "one", pass),
        ])
        .unwrap();

        assert_eq!(groups[0].name(), "Later");
        assert_eq!(groups[1].name(), "Earlier");
    }

    #[test]
    fn test_duplicate_ordinals_keep_declaration_order() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 2, "b", pass),
            KoanDeclaration::new("Arrays", 1, "a", pass),
            KoanDeclaration::new("Arrays", 2, "c", pass),
            KoanDeclaration::new("Arrays", 2, "d", pass),
        ])
        .unwrap();

        assert_eq!(names(&groups[0]), vec!["a", "b", "c", "d"]);
        let indices: Vec<_> = groups[0].units().iter().map(KoanUnit::declaration_index).collect();
        assert_eq!(indices, vec![1, 0, 2, 3]);
    }

    #[test]
    fn test_missing_ordinal_aborts_before_any_check_runs() {
        let calls = Rc::new(Cell::new(0));
        let counted = {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                Ok(())
            }
        };

        let err = discover(vec![
            KoanDeclaration::new("Arrays", 1, "fine", counted),
            KoanDeclaration::untagged("untagged", pass).in_group("Arrays"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::MissingOrdinal {
                group: "Arrays".to_string(),
                name: "untagged".to_string(),
            }
        );
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_missing_group_is_configuration_error() {
        let err = discover(vec![KoanDeclaration::untagged("floating", pass).with_ordinal(1)]).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingGroup {
                name: "floating".to_string()
            }
        );
    }

    #[test]
    fn test_zero_ordinal_is_rejected() {
        let err = discover(vec![KoanDeclaration::new("Arrays", 0, "zeroth", pass)]).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidOrdinal { ordinal: 0, .. }));
    }

    #[test]
    fn test_discover_empty() {
        let groups = discover(Vec::<KoanDeclaration>::new()).unwrap();
        assert!(groups.is_empty());
    }

    // ========================================
    // run
    // ========================================

    #[test]
    fn test_failure_skips_rest_of_group_without_invoking_checks() {
        let invoked = Rc::new(Cell::new(0));
        let mut decls = Vec::new();
        for ordinal in 1..=6 {
            let invoked = Rc::clone(&invoked);
            decls.push(KoanDeclaration::new("Arrays", ordinal, format!("koan_{ordinal}"), move || {
                invoked.set(invoked.get() + 1);
                if ordinal == 3 { fail("expected 42, got 13") } else { Ok(()) }
            }));
        }
        decls.push(KoanDeclaration::new("Inheritance", 1, "still_runs", pass));

        let groups = discover(decls).unwrap();
        let results = run(&groups);

        assert_eq!(
            outcomes(&results),
            vec![
                Outcome::Passed,
                Outcome::Passed,
                Outcome::Failed("expected 42, got 13".to_string()),
                Outcome::Skipped,
                Outcome::Skipped,
                Outcome::Skipped,
                Outcome::Passed,
            ]
        );
        assert_eq!(invoked.get(), 3);
        assert_eq!(results[6].group, "Inheritance");
    }

    #[test]
    fn test_units_execute_in_ordinal_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut decls = Vec::new();
        for ordinal in [4, 2, 5, 1, 3] {
            let order = Rc::clone(&order);
            decls.push(KoanDeclaration::new("Arrays", ordinal, format!("k{ordinal}"), move || {
                order.borrow_mut().push(ordinal);
                Ok(())
            }));
        }

        let groups = discover(decls).unwrap();
        run(&groups);
        assert_eq!(*order.borrow(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_panic_is_a_failure() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 1, "out_of_bounds", || {
                let values = vec![42];
                expect_eq(13, values[values.len()])
            }),
            KoanDeclaration::new("Arrays", 2, "after", pass),
        ])
        .unwrap();

        let results = run(&groups);
        match &results[0].outcome {
            Outcome::Failed(reason) => assert!(reason.contains("index out of bounds"), "{reason}"),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(results[1].outcome, Outcome::Skipped);
    }

    #[test]
    fn test_skipped_results_have_zero_duration() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 1, "bad", || fail("nope")),
            KoanDeclaration::new("Arrays", 2, "never", pass),
        ])
        .unwrap();

        let results = run(&groups);
        assert_eq!(results[1].duration, Duration::ZERO);
    }

    #[test]
    fn test_observer_sees_results_in_execution_order() {
        #[derive(Default)]
        struct Recorder {
            events: Vec<String>,
        }
        impl RunObserver for Recorder {
            fn on_group_start(&mut self, group: &KoanGroup) {
                self.events.push(format!("group {}", group.name()));
            }
            fn on_result(&mut self, result: &RunResult) {
                self.events.push(format!("{} {}", result.group, result.name));
            }
        }

        let groups = discover(vec![
            KoanDeclaration::new("A", 2, "second", pass),
            KoanDeclaration::new("B", 1, "only", pass),
            KoanDeclaration::new("A", 1, "first", pass),
        ])
        .unwrap();

        let mut recorder = Recorder::default();
        let results = run_with(&groups, &mut recorder);

        assert_eq!(results.len(), 3);
        assert_eq!(recorder.events, vec!["group A", "A first", "A second", "group B", "B only"]);
    }

    // ========================================
    // summarize
    // ========================================

    #[test]
    fn test_summarize_empty_is_enlightened() {
        let summary = summarize(&[]);
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.passed, 0);
        assert!(summary.is_enlightened());
        assert_eq!(summary.next_koan, None);
    }

    #[test]
    fn test_summarize_counts_and_next_koan() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 1, "ok", pass),
            KoanDeclaration::new("Arrays", 2, "broken", || fail("fill me in")),
            KoanDeclaration::new("Arrays", 3, "later", pass),
            KoanDeclaration::new("Inheritance", 1, "also_broken", || fail("and me")),
        ])
        .unwrap();

        let summary = summarize(&run(&groups));
        assert_eq!((summary.passed, summary.failed, summary.skipped), (1, 2, 1));
        assert_eq!(summary.total(), 4);
        assert!(!summary.is_enlightened());
        assert_eq!(summary.next_koan, Some(("Arrays".to_string(), "broken".to_string())));
    }

    #[test]
    fn test_all_passed_is_enlightened() {
        let groups = discover(vec![
            KoanDeclaration::new("Arrays", 1, "a", pass),
            KoanDeclaration::new("Arrays", 2, "b", pass),
        ])
        .unwrap();
        assert!(summarize(&run(&groups)).is_enlightened());
    }
}
