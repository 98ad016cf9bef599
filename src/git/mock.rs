//! Recording git runner for tests

use crate::error::FetchError;
use crate::git::{GitInvocation, GitRunner, SparseStep};
use crate::system::{MockSystem, System as _};
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory stand-in for `git`
///
/// Every invocation is recorded. A successful clone creates its destination
/// in the shared `MockSystem`; a successful checkout creates the path given to
/// the preceding `sparse-checkout set` inside the working directory.
#[derive(Clone)]
pub struct MockGitRunner {
    system: MockSystem,
    fail_at: Option<SparseStep>,
    calls: Arc<RwLock<Vec<GitInvocation>>>,
}

impl MockGitRunner {
    /// Create a runner where every step succeeds
    #[must_use]
    #[inline]
    pub fn new(system: MockSystem) -> Self {
        Self {
            system,
            fail_at: None,
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Make the given step exit unsuccessfully (builder pattern)
    #[must_use]
    #[inline]
    pub fn failing_at(mut self, step: SparseStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// All invocations seen so far, in order
    #[must_use]
    #[inline]
    pub fn calls(&self) -> Vec<GitInvocation> {
        self.calls.read().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Steps seen so far, in order
    #[must_use]
    #[inline]
    pub fn steps(&self) -> Vec<SparseStep> {
        self.calls().iter().map(|call| call.step).collect()
    }

    fn last_sparse_path(&self) -> Option<String> {
        self.calls()
            .iter()
            .rev()
            .find(|call| call.step == SparseStep::SetPath)
            .and_then(|call| call.args.last().cloned())
    }
}

impl GitRunner for MockGitRunner {
    #[inline]
    fn run(&self, invocation: &GitInvocation) -> Result<()> {
        self.calls
            .write()
            .map_err(|e| anyhow::anyhow!("mock runner state poisoned: {e}"))?
            .push(invocation.clone());

        if self.fail_at == Some(invocation.step) {
            return Err(FetchError::git(format!(
                "`{}` ({} step) exited with exit status: 128",
                invocation.display_command(),
                invocation.step
            ))
            .into());
        }

        match invocation.step {
            SparseStep::Clone => {
                let destination = invocation
                    .args
                    .last()
                    .map(PathBuf::from)
                    .context("clone invocation has no destination")?;
                self.system.create_dir_all(&destination)?;
                self.system
                    .create_dir_all(&destination.join(".git"))?;
            }
            SparseStep::Checkout => {
                let dir = invocation
                    .working_dir
                    .as_deref()
                    .unwrap_or_else(|| Path::new("."));
                if let Some(sparse) = self.last_sparse_path() {
                    self.system.create_dir_all(&dir.join(sparse))?;
                }
            }
            SparseStep::InitCone | SparseStep::SetPath => {}
        }

        Ok(())
    }
}
