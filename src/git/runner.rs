//! Execution of git invocations

use crate::error::FetchError;
use crate::git::GitInvocation;
use anyhow::Result;
use std::process::Command;
use tracing::debug;

/// Runs a single git invocation to completion
///
/// # Implementations
/// - `RealGitRunner`: spawns the `git` binary
/// - `MockGitRunner`: records invocations and simulates their effect on a `MockSystem`
pub trait GitRunner {
    /// Run the invocation, blocking until it exits
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exits unsuccessfully
    fn run(&self, invocation: &GitInvocation) -> Result<()>;
}

/// Spawns the `git` binary found on `PATH`
///
/// Standard streams are inherited, so whatever git prints reaches the user
/// unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealGitRunner;

impl RealGitRunner {
    #[must_use]
    pub const fn new() -> Self {
        return Self;
    }
}

impl GitRunner for RealGitRunner {
    fn run(&self, invocation: &GitInvocation) -> Result<()> {
        let mut command = Command::new("git");
        command.args(&invocation.args);
        if let Some(dir) = invocation.working_dir.as_ref() {
            command.current_dir(dir);
        }

        debug!("Spawning `{}`", invocation.display_command());
        let status = command.status().map_err(|e| {
            return FetchError::git(format!(
                "Failed to execute `{}` ({} step): {e}. Please ensure Git and git-lfs are installed and available in PATH",
                invocation.display_command(),
                invocation.step
            ));
        })?;

        if !status.success() {
            return Err(FetchError::git(format!(
                "`{}` ({} step) exited with {status}",
                invocation.display_command(),
                invocation.step
            ))
            .into());
        }

        Ok(())
    }
}
