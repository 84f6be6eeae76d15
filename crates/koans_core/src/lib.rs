#![forbid(unsafe_code)]
//! Sequence and score koans: small, self-contained exercises a learner works through in order.
//!
//! This crate is the pure half of the koan runner: **no IO**, no global state. It knows how to
//!
//! - turn raw registrations ([`KoanDeclaration`], usually built with [`koan!`]) into ordered
//!   [`KoanGroup`]s ([`discover`]),
//! - run them with the stop-at-first-failure-per-group policy ([`run`], [`run_with`]), and
//! - decide whether the learner has reached enlightenment ([`summarize`]).
//!
//! ## Notes
//!
//! - Groups keep the order in which they first appear; ordinals only order units inside a group.
//! - Checks return [`CheckResult`]. A panic inside a check counts as a failure, exactly like an `Err`.
//! - Rendering results is the caller's job; see the `koans` binary for the console and JSON reporters.

pub mod assert;
pub mod errors;
pub mod sequencer;
pub mod unit;

pub use errors::{AssertionFailure, ConfigurationError};
pub use sequencer::{NoopObserver, Outcome, RunObserver, RunResult, Summary, discover, run, run_with, summarize};
pub use unit::{Check, CheckResult, KoanDeclaration, KoanGroup, KoanUnit};
