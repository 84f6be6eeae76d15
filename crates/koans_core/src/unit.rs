//! Koan declarations, units and groups.
//!
//! A [`KoanDeclaration`] is the raw registration tuple `(group, ordinal, name, check)` handed to
//! [`crate::sequencer::discover`]. Discovery validates declarations and turns them into immutable
//! [`KoanUnit`]s collected into [`KoanGroup`]s.
//!
//! ## Examples
//! ```rust
//! use koans_core::{koan, CheckResult, KoanDeclaration};
//! use koans_core::assert::expect_eq;
//!
//! fn addition() -> CheckResult {
//!     expect_eq(4, 2 + 2)
//! }
//!
//! let decl: KoanDeclaration = koan!("Numbers", 1, addition);
//! assert_eq!(decl.name(), "addition");
//! assert_eq!(decl.group(), Some("Numbers"));
//! assert_eq!(decl.ordinal(), Some(1));
//! ```

use std::fmt;

use crate::errors::AssertionFailure;

/// What a koan check returns.
pub type CheckResult = Result<(), AssertionFailure>;

/// A zero-argument koan check.
///
/// Boxed so a check may capture state.
pub type Check = Box<dyn Fn() -> CheckResult>;

/// Register a plain `fn` item as a koan, using the function's identifier as its name.
///
/// ```rust
/// # use koans_core::{koan, CheckResult};
/// fn creating_arrays() -> CheckResult { Ok(()) }
/// let decl = koan!("Arrays", 1, creating_arrays);
/// assert_eq!(decl.name(), "creating_arrays");
/// ```
#[macro_export]
macro_rules! koan {
    ($group:expr, $ordinal:expr, $check:ident) => {
        $crate::KoanDeclaration::new($group, $ordinal, stringify!($check), $check)
    };
}

// ============================================================================
// Declarations
// ============================================================================

/// One raw koan registration, as supplied by the curriculum.
///
/// Group and ordinal are optional here so that an incomplete registration can exist and be rejected
/// by discovery with a [`crate::ConfigurationError`].
pub struct KoanDeclaration {
    name: String,
    group: Option<String>,
    ordinal: Option<u32>,
    check: Check,
}

impl KoanDeclaration {
    /// Create a fully tagged declaration.
    pub fn new<F>(group: impl Into<String>, ordinal: u32, name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> CheckResult + 'static,
    {
        Self::untagged(name, check).in_group(group).with_ordinal(ordinal)
    }

    /// Create a declaration with neither group nor ordinal.
    pub fn untagged<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> CheckResult + 'static,
    {
        Self {
            name: name.into(),
            group: None,
            ordinal: None,
            check: Box::new(check),
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Option<u32>, Check) {
        (self.name, self.group, self.ordinal, self.check)
    }
}

impl fmt::Debug for KoanDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoanDeclaration")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("ordinal", &self.ordinal)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Units and groups
// ============================================================================

/// A validated, runnable koan.
pub struct KoanUnit {
    pub(crate) name: String,
    pub(crate) group: String,
    pub(crate) ordinal: u32,
    pub(crate) declaration_index: usize,
    pub(crate) check: Check,
}

impl KoanUnit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Position of this unit's declaration in the discovery scan.
    pub fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    /// Run the check once. Panics are not caught here; see [`crate::sequencer::run_with`].
    pub fn check(&self) -> CheckResult {
        (self.check)()
    }
}

impl fmt::Debug for KoanUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoanUnit")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("ordinal", &self.ordinal)
            .field("declaration_index", &self.declaration_index)
            .finish_non_exhaustive()
    }
}

/// All units of one topic, sorted by ordinal.
#[derive(Debug)]
pub struct KoanGroup {
    pub(crate) name: String,
    pub(crate) units: Vec<KoanUnit>,
}

impl KoanGroup {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[KoanUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
