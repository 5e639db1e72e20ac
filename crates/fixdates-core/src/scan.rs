use std::collections::HashSet;
use std::fs;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lazy walk over every regular file below a list of roots.
///
/// Roots that cannot be stat'ed are logged and skipped, as are entries that
/// fail mid-walk (permission denied, broken symlink, symlink loop). Symlinks
/// are followed, so a linked directory is walked and a linked file is
/// yielded, but directories themselves never are.
///
/// A file reachable twice (overlapping roots, a symlink back into the tree)
/// is yielded once, under the first path it was found at.
pub struct Files {
    roots: std::vec::IntoIter<PathBuf>,
    walker: Option<walkdir::IntoIter>,
    seen: HashSet<PathBuf>,
}

/// Start walking `roots` in order. No I/O happens until the first `next()`.
pub fn enumerate_files<P: AsRef<Path>>(roots: &[P]) -> Files {
    let roots: Vec<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
    Files {
        roots: roots.into_iter(),
        walker: None,
        seen: HashSet::new(),
    }
}

impl Iterator for Files {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            if let Some(walker) = self.walker.as_mut() {
                match walker.next() {
                    Some(Ok(entry)) => {
                        if !entry.file_type().is_file() {
                            continue;
                        }
                        let key = fs::canonicalize(entry.path())
                            .unwrap_or_else(|_| entry.path().to_path_buf());
                        if self.seen.insert(key) {
                            return Some(entry.into_path());
                        }
                        debug!(path = %entry.path().display(), "already enumerated");
                    }
                    Some(Err(err)) => {
                        let path = err.path().map(|p| p.display().to_string()).unwrap_or_default();
                        warn!(path = %path, error = %err, "skipping unreadable entry");
                    }
                    None => self.walker = None,
                }
                continue;
            }

            let root = self.roots.next()?;
            match fs::metadata(&root) {
                Ok(_) => {
                    self.walker = Some(WalkDir::new(&root).follow_links(true).into_iter());
                }
                Err(err) => {
                    warn!(root = %root.display(), error = %err, "skipping unreadable root");
                }
            }
        }
    }
}

impl FusedIterator for Files {}
