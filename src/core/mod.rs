//! Core model – card records, descriptor loading, transform math and
//! gesture thresholds.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod card;
pub mod data;
pub mod gesture;
pub mod transform;
