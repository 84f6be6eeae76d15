//! Expectation helpers for koan checks.
//!
//! Unlike `assert!`/`assert_eq!`, these return a [`CheckResult`] so a koan can chain them with `?` and
//! the failure message reaches the learner verbatim. Panics are still caught by the runner, so plain
//! `assert_eq!` inside a koan works too.
//!
//! ```rust
//! use koans_core::CheckResult;
//! use koans_core::assert::{expect_eq, expect_true};
//!
//! fn slicing() -> CheckResult {
//!     let words = ["peanut", "butter", "and", "jelly"];
//!     expect_eq(&["peanut", "butter"][..], &words[..2])?;
//!     expect_true(words.len() == 4, "four words")
//! }
//! assert!(slicing().is_ok());
//! ```

use std::fmt::Debug;
use std::panic::{self, UnwindSafe};

use crate::errors::AssertionFailure;
use crate::unit::CheckResult;

/// Expect `actual` to equal `expected`.
pub fn expect_eq<T: PartialEq + Debug>(expected: T, actual: T) -> CheckResult {
    if expected == actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "expected {:?}, got {:?}",
            expected, actual
        )))
    }
}

/// Expect `actual` to differ from `unexpected`.
pub fn expect_ne<T: PartialEq + Debug>(unexpected: T, actual: T) -> CheckResult {
    if unexpected != actual {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!(
            "expected anything but {:?}",
            unexpected
        )))
    }
}

/// Expect `condition` to hold. `what` describes the condition for the failure message.
pub fn expect_true(condition: bool, what: &str) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure::new(format!("expected {} to be true", what)))
    }
}

/// Expect `condition` not to hold.
pub fn expect_false(condition: bool, what: &str) -> CheckResult {
    if condition {
        Err(AssertionFailure::new(format!("expected {} to be false", what)))
    } else {
        Ok(())
    }
}

/// Expect a value to be present.
pub fn expect_some<T>(value: Option<T>, what: &str) -> Result<T, AssertionFailure> {
    value.ok_or_else(|| AssertionFailure::new(format!("expected {} to be present", what)))
}

/// Expect no value.
pub fn expect_none<T: Debug>(value: Option<T>, what: &str) -> CheckResult {
    match value {
        None => Ok(()),
        Some(v) => Err(AssertionFailure::new(format!(
            "expected {} to be absent, got {:?}",
            what, v
        ))),
    }
}

/// Expect `operation` to panic.
pub fn expect_panics<F>(operation: F, what: &str) -> CheckResult
where
    F: FnOnce() + UnwindSafe,
{
    match panic::catch_unwind(operation) {
        Err(_) => Ok(()),
        Ok(()) => Err(AssertionFailure::new(format!("expected {} to panic", what))),
    }
}

/// Fail unconditionally.
pub fn fail(message: impl Into<String>) -> CheckResult {
    Err(AssertionFailure::new(message))
}
