//! The koan curriculum, in the order a learner walks it.
//!
//! ## Adding a topic
//!
//! Create a module with a `GROUP` name and a `koans()` function that lists its checks with
//! [`koans_core::koan!`], then chain it into [`declarations`]. Topic order here is the order learners
//! see; ordinals only order koans inside a topic.

pub mod about_arrays;
pub mod about_inheritance;

use koans_core::KoanDeclaration;

/// Every registered koan, topic by topic.
pub fn declarations() -> Vec<KoanDeclaration> {
    let mut all = about_arrays::koans();
    all.extend(about_inheritance::koans());
    all
}
