//! The fixed location of the OEIS sequence dataset

use std::path::{Path, PathBuf};

/// Remote repository holding the OEIS data
pub const OEIS_DATA_URL: &str = "https://github.com/oeis/oeisdata.git";

/// Local directory the dataset is cloned into, relative to the working directory
pub const OEIS_DATA_TARGET: &str = "./output";

/// The only subdirectory kept by the sparse checkout
pub const OEIS_SEQ_PATH: &str = "seq";

/// Where a dataset lives remotely and where it lands locally
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct DatasetSource {
    pub url: String,
    pub target: PathBuf,
    pub sparse_path: String,
}

impl DatasetSource {
    /// The OEIS dataset, restricted to its `seq` directory
    #[must_use]
    #[inline]
    pub fn oeis() -> Self {
        Self {
            url: OEIS_DATA_URL.to_owned(),
            target: PathBuf::from(OEIS_DATA_TARGET),
            sparse_path: OEIS_SEQ_PATH.to_owned(),
        }
    }

    /// A dataset at an arbitrary location
    ///
    /// The command-line tool always uses [`DatasetSource::oeis`]; this exists so
    /// tests can point the same machinery at a local repository.
    #[must_use]
    #[inline]
    pub fn new<U, T, S>(url: U, target: T, sparse_path: S) -> Self
    where
        U: Into<String>,
        T: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            url: url.into(),
            target: target.into(),
            sparse_path: sparse_path.into(),
        }
    }

    /// Directory holding the sparse-checked-out files once the fetch completed
    #[must_use]
    #[inline]
    pub fn checkout_dir(&self) -> PathBuf {
        self.target.join(&self.sparse_path)
    }

    #[must_use]
    #[inline]
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl Default for DatasetSource {
    #[inline]
    fn default() -> Self {
        Self::oeis()
    }
}
