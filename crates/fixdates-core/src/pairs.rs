use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::date::DateOptions;
use crate::error::Result;
use crate::name;
use crate::scan::{self, Files};

/// A file and the sibling path it should be renamed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenamePair {
    pub original: PathBuf,
    pub new: PathBuf,
}

impl RenamePair {
    /// Pair `path` with its computed name in the same directory.
    pub fn for_path(path: PathBuf, options: &DateOptions) -> Result<Self> {
        let new_name = name::compute_new_filename_with(&path, options)?;
        let new = path.parent().unwrap_or_else(|| Path::new("")).join(new_name);
        Ok(Self { original: path, new })
    }

    pub fn is_noop(&self) -> bool {
        self.original == self.new
    }
}

/// Lazy `(original, new)` pairs for every enumerated file.
///
/// The first failure is yielded as `Err` and ends the sequence.
pub struct FilenamePairs {
    files: Files,
    options: DateOptions,
    failed: bool,
}

pub fn get_filename_pairs<P: AsRef<Path>>(roots: &[P]) -> FilenamePairs {
    get_filename_pairs_with(roots, DateOptions::default())
}

pub fn get_filename_pairs_with<P: AsRef<Path>>(roots: &[P], options: DateOptions) -> FilenamePairs {
    FilenamePairs {
        files: scan::enumerate_files(roots),
        options,
        failed: false,
    }
}

impl Iterator for FilenamePairs {
    type Item = Result<RenamePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let path = self.files.next()?;
        let pair = RenamePair::for_path(path, &self.options);
        self.failed = pair.is_err();
        Some(pair)
    }
}

impl FusedIterator for FilenamePairs {}

/// Same pairs as [`get_filename_pairs_with`], with names computed on the
/// rayon pool. Enumeration stays sequential and order is preserved.
pub fn collect_pairs_parallel<P: AsRef<Path>>(
    roots: &[P],
    options: &DateOptions,
) -> Result<Vec<RenamePair>> {
    let files: Vec<PathBuf> = scan::enumerate_files(roots).collect();
    // Collect every result first so the reported error is the earliest one.
    let results: Vec<Result<RenamePair>> = files
        .into_par_iter()
        .map(|path| RenamePair::for_path(path, options))
        .collect();
    results.into_iter().collect()
}
