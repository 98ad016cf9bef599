//! Git sparse checkout plan

use crate::git::{DatasetSource, GitRunner};
use anyhow::Result;
use core::fmt;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// One of the four git invocations making up a sparse clone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SparseStep {
    /// Shallow clone without checking out a working tree
    Clone,
    /// `sparse-checkout init --cone`
    InitCone,
    /// `sparse-checkout set <path>`
    SetPath,
    /// Populate the working tree
    Checkout,
}

impl SparseStep {
    /// Stable name used in logs and JSON output
    #[must_use]
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clone => "clone",
            Self::InitCone => "init-cone",
            Self::SetPath => "set-path",
            Self::Checkout => "checkout",
        }
    }
}

impl fmt::Display for SparseStep {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single `git` command line, with the directory it must run in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct GitInvocation {
    pub step: SparseStep,
    /// Arguments passed to `git`, excluding the program name
    pub args: Vec<String>,
    /// `None` means the process working directory
    pub working_dir: Option<PathBuf>,
}

impl GitInvocation {
    fn new(step: SparseStep, args: &[&str], working_dir: Option<PathBuf>) -> Self {
        Self {
            step,
            args: args.iter().map(|&arg| arg.to_owned()).collect(),
            working_dir,
        }
    }

    /// The command as a human-readable string, for logs and error messages
    #[must_use]
    #[inline]
    pub fn display_command(&self) -> String {
        format!("git {}", self.args.join(" "))
    }
}

/// Performs a shallow sparse clone of one directory of a dataset repository
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SparseClone {
    pub source: DatasetSource,
}

impl SparseClone {
    #[must_use]
    #[inline]
    pub const fn new(source: DatasetSource) -> Self {
        Self { source }
    }

    /// The four invocations in the order they must run
    #[must_use]
    #[inline]
    pub fn invocations(&self) -> Vec<GitInvocation> {
        let target = self.source.target.to_string_lossy();
        let in_target = Some(self.source.target.clone());

        vec![
            GitInvocation::new(
                SparseStep::Clone,
                &[
                    "clone",
                    "--no-checkout",
                    "--depth=1",
                    self.source.url.as_str(),
                    &*target,
                ],
                None,
            ),
            GitInvocation::new(
                SparseStep::InitCone,
                &["sparse-checkout", "init", "--cone"],
                in_target.clone(),
            ),
            GitInvocation::new(
                SparseStep::SetPath,
                &["sparse-checkout", "set", self.source.sparse_path.as_str()],
                in_target.clone(),
            ),
            GitInvocation::new(SparseStep::Checkout, &["checkout"], in_target),
        ]
    }

    /// Run every invocation in order, stopping at the first failure
    ///
    /// Nothing is cleaned up on failure: a clone that succeeded before a later
    /// step failed stays on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository cannot be cloned
    /// - The sparse checkout cannot be initialized
    /// - The sparse checkout path cannot be set
    /// - The working tree cannot be checked out
    #[inline]
    pub fn execute(&self, runner: &dyn GitRunner) -> Result<()> {
        debug!(
            "Executing sparse clone of '{}' into {:?}",
            self.source.url, self.source.target
        );

        for invocation in self.invocations() {
            debug!("Running step {}: {}", invocation.step, invocation.display_command());
            runner.run(&invocation)?;
            debug!("Step {} finished", invocation.step);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn oeis_plan_matches_expected_commands() {
        let plan = SparseClone::new(DatasetSource::oeis()).invocations();

        let steps: Vec<_> = plan.iter().map(|i| i.step).collect();
        assert_eq!(
            steps,
            vec![
                SparseStep::Clone,
                SparseStep::InitCone,
                SparseStep::SetPath,
                SparseStep::Checkout
            ]
        );

        assert_eq!(
            plan[0].args,
            vec![
                "clone",
                "--no-checkout",
                "--depth=1",
                "https://github.com/oeis/oeisdata.git",
                "./output"
            ]
        );
        assert_eq!(plan[0].working_dir, None);

        assert_eq!(plan[1].args, vec!["sparse-checkout", "init", "--cone"]);
        assert_eq!(plan[2].args, vec!["sparse-checkout", "set", "seq"]);
        assert_eq!(plan[3].args, vec!["checkout"]);

        for invocation in &plan[1..] {
            assert_eq!(invocation.working_dir.as_deref(), Some(Path::new("./output")));
        }
    }

    #[test]
    fn display_command_joins_args() {
        let plan = SparseClone::new(DatasetSource::oeis()).invocations();
        assert_eq!(plan[2].display_command(), "git sparse-checkout set seq");
    }

    #[test]
    fn step_names_are_kebab_case() {
        assert_eq!(SparseStep::InitCone.to_string(), "init-cone");
        assert_eq!(
            serde_json::to_value(SparseStep::SetPath).unwrap(),
            serde_json::json!("set-path")
        );
    }
}
