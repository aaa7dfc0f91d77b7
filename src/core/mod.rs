//! Core functionality for directory walking and package grouping

pub mod filter;
pub mod walker;

pub use filter::{should_skip, SkipDecision};
pub use walker::{scan, Walker};
