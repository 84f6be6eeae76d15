//! Error types for koan discovery and koan checks.
//!
//! There are exactly two failure families:
//!
//! - [`ConfigurationError`]: a declaration is incomplete. Fatal: discovery aborts before any koan runs.
//! - [`AssertionFailure`]: a koan's expectation was not met (or its check panicked). Recovered per unit.

use miette::Diagnostic;
use thiserror::Error;

/// Placeholder shown where a declaration has no group.
pub const NO_GROUP: &str = "<none>";

/// A koan declaration could not be turned into a runnable unit.
///
/// Every variant carries the unit's group and name so the learner can find the offending declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("koan `{group} - {name}` has no ordinal")]
    #[diagnostic(
        code(koans::config::missing_ordinal),
        help("register the koan with `koan!(GROUP, ORDINAL, name)` or call `.with_ordinal(n)`")
    )]
    MissingOrdinal { group: String, name: String },

    #[error("koan `{name}` has no group")]
    #[diagnostic(
        code(koans::config::missing_group),
        help("every koan belongs to a topic; call `.in_group(\"Topic\")` on the declaration")
    )]
    MissingGroup { name: String },

    #[error("koan `{group} - {name}` has ordinal {ordinal}, ordinals start at 1")]
    #[diagnostic(code(koans::config::invalid_ordinal))]
    InvalidOrdinal { group: String, name: String, ordinal: u32 },
}

impl ConfigurationError {
    /// Group of the offending declaration, or [`NO_GROUP`].
    pub fn group(&self) -> &str {
        match self {
            ConfigurationError::MissingOrdinal { group, .. } | ConfigurationError::InvalidOrdinal { group, .. } => group,
            ConfigurationError::MissingGroup { .. } => NO_GROUP,
        }
    }

    /// Name of the offending declaration.
    pub fn name(&self) -> &str {
        match self {
            ConfigurationError::MissingOrdinal { name, .. }
            | ConfigurationError::MissingGroup { name }
            | ConfigurationError::InvalidOrdinal { name, .. } => name,
        }
    }
}

/// A koan's expectation was not met.
///
/// The message is kept verbatim; it is what the learner reads next to `FAIL:`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
}

impl AssertionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build a failure from a `catch_unwind` payload.
    ///
    /// `&str` and `String` payloads (everything `panic!` with a message produces) are kept as-is.
    pub fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "check panicked with a non-string payload".to_string()
        };
        Self::new(message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

impl From<String> for AssertionFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for AssertionFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}
