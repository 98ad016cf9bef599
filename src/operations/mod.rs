//! Operations module
//!
//! Coordinates the conditional fetch, its dry-run preview and the graph build

pub mod fetch;
pub mod plan;

pub use fetch::*;
pub use plan::*;
