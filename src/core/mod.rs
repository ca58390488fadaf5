//! Core data — the scroll surface abstraction, the tripled card track, and
//! review records.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod reviews;
pub mod surface;
pub mod track;
