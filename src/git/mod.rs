//! Git operations module
//!
//! Describes the sparse clone of the sequence dataset and runs it through `git`

pub mod dataset;
pub mod mock;
pub mod runner;
pub mod sparse_checkout;

pub use dataset::*;
pub use mock::MockGitRunner;
pub use runner::*;
pub use sparse_checkout::*;
