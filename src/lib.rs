#![forbid(unsafe_code)]
//! Koans: learn Rust by making failing checks pass
//!
//! The curriculum lives in [`curriculum`]; each topic registers its koans with an ordinal. The
//! `koans` binary discovers them through `koans_core`, runs them in order, and prints where to
//! meditate next.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Koan bodies**: A koan may panic (indexing out of bounds, `unwrap` on `None`). The sequencer
//!   records that as a failure with the panic message as its reason.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod curriculum;
