//! Idempotent conditional fetch of the dataset

use crate::error::FetchError;
use crate::git::{GitRunner, SparseClone};
use crate::system::System;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// What a call to [`Fetcher::ensure`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchOutcome {
    /// The target directory was already there; nothing was run
    AlreadyPresent,
    /// The sparse clone ran to completion
    Fetched,
}

/// Clones the dataset unless its target directory already exists
///
/// The presence of the directory is the only evidence of a previous run. Its
/// contents are never inspected, so an interrupted earlier fetch is not
/// repaired.
#[non_exhaustive]
pub struct Fetcher<'src> {
    clone: SparseClone,
    system: &'src dyn System,
    runner: &'src dyn GitRunner,
}

impl<'src> Fetcher<'src> {
    #[must_use]
    #[inline]
    pub fn new(clone: SparseClone, system: &'src dyn System, runner: &'src dyn GitRunner) -> Self {
        Self {
            clone,
            system,
            runner,
        }
    }

    /// Fetch the dataset if its target directory is missing
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target cannot be inspected; no git step is attempted
    /// - Any git step fails; later steps are not attempted and whatever
    ///   earlier steps wrote is left in place
    #[inline]
    pub fn ensure(&self) -> Result<FetchOutcome> {
        let target = self.clone.source.target();

        if target_exists(self.system, target)? {
            info!("{} already present, skipping fetch", target.display());
            return Ok(FetchOutcome::AlreadyPresent);
        }

        info!(
            "Fetching '{}' ({}) into {}",
            self.clone.source.url,
            self.clone.source.sparse_path,
            target.display()
        );
        self.clone.execute(self.runner)?;
        debug!("Sparse clone complete");

        info!("\u{2713} Fetched {}", self.clone.source.checkout_dir().display());
        Ok(FetchOutcome::Fetched)
    }

    /// Whether the target directory is already in place
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be inspected
    #[inline]
    pub fn target_present(&self) -> Result<bool> {
        target_exists(self.system, self.clone.source.target())
    }

    /// The plan this fetcher would run
    #[must_use]
    #[inline]
    pub const fn sparse_clone(&self) -> &SparseClone {
        &self.clone
    }
}

/// Existence check on the fetch target
///
/// A path that cannot be inspected is reported as a filesystem error rather
/// than treated as absent, so no clone is attempted over it.
fn target_exists(system: &dyn System, target: &Path) -> Result<bool> {
    let exists = system.try_exists(target).map_err(|e| {
        return FetchError::filesystem(format!(
            "Cannot check whether {} exists: {e}",
            target.display()
        ));
    })?;

    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{DatasetSource, MockGitRunner, SparseStep};
    use crate::system::MockSystem;

    fn work_source() -> DatasetSource {
        DatasetSource::new("https://example.test/data.git", "/work/output", "seq")
    }

    #[test]
    fn missing_target_runs_all_steps_in_order() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let runner = MockGitRunner::new(system.clone());
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        let outcome = fetcher.ensure().unwrap();

        assert_eq!(outcome, FetchOutcome::Fetched);
        assert_eq!(
            runner.steps(),
            vec![
                SparseStep::Clone,
                SparseStep::InitCone,
                SparseStep::SetPath,
                SparseStep::Checkout
            ]
        );
        assert!(system.is_dir(Path::new("/work/output")));
        assert!(system.is_dir(Path::new("/work/output/seq")));
    }

    #[test]
    fn existing_target_runs_nothing_and_keeps_contents() {
        let system = MockSystem::new()
            .with_file("/work/output/notes.txt", b"keep me")
            .unwrap();
        let runner = MockGitRunner::new(system.clone());
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        let outcome = fetcher.ensure().unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
        assert!(runner.calls().is_empty());
        assert_eq!(system.file_count_under(Path::new("/work/output")), 1);
        assert_eq!(
            system.read_to_string(Path::new("/work/output/notes.txt")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn clone_failure_stops_before_sparse_steps() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let runner = MockGitRunner::new(system.clone()).failing_at(SparseStep::Clone);
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        let err = fetcher.ensure().unwrap_err();

        assert_eq!(runner.steps(), vec![SparseStep::Clone]);
        assert!(!system.try_exists(Path::new("/work/output")).unwrap());
        assert_eq!(
            err.downcast_ref::<FetchError>().map(FetchError::exit_code),
            Some(2)
        );
    }

    #[test]
    fn init_failure_leaves_incomplete_clone_behind() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let runner = MockGitRunner::new(system.clone()).failing_at(SparseStep::InitCone);
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        assert!(fetcher.ensure().is_err());

        assert_eq!(runner.steps(), vec![SparseStep::Clone, SparseStep::InitCone]);
        assert!(system.is_dir(Path::new("/work/output")));
        assert!(!system.try_exists(Path::new("/work/output/seq")).unwrap());
    }

    #[test]
    fn incomplete_clone_counts_as_present_on_next_run() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let failing = MockGitRunner::new(system.clone()).failing_at(SparseStep::SetPath);
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &failing);
        assert!(fetcher.ensure().is_err());

        let runner = MockGitRunner::new(system.clone());
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        assert_eq!(fetcher.ensure().unwrap(), FetchOutcome::AlreadyPresent);
        assert!(runner.calls().is_empty());
        assert!(!system.try_exists(Path::new("/work/output/seq")).unwrap());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let runner = MockGitRunner::new(system.clone());
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);

        assert_eq!(fetcher.ensure().unwrap(), FetchOutcome::Fetched);
        assert_eq!(fetcher.ensure().unwrap(), FetchOutcome::AlreadyPresent);
        assert_eq!(runner.calls().len(), 4);
    }

    #[test]
    fn sparse_steps_run_inside_target() {
        let system = MockSystem::new().with_dir("/work").unwrap();
        let runner = MockGitRunner::new(system.clone());
        let fetcher = Fetcher::new(SparseClone::new(work_source()), &system, &runner);
        fetcher.ensure().unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].working_dir, None);
        assert_eq!(calls[0].args.last().map(String::as_str), Some("/work/output"));
        for call in &calls[1..] {
            assert_eq!(call.working_dir.as_deref(), Some(Path::new("/work/output")));
        }
    }
}
