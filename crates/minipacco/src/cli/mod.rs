//! CLI command implementations.

mod display;

pub mod bundle;
pub mod cycles;
pub mod graph;
