use std::fs;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::plan::RenamePlan;
use crate::progress::ThrottledProgress;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub renamed: u64,
    pub dry_run: bool,
}

/// Perform the renames in `plan`, in order, stopping at the first failure.
///
/// A target that appeared after planning is reported as `TargetExists`
/// rather than overwritten. With `dry_run` nothing on disk changes.
pub fn apply_plan(
    plan: &RenamePlan,
    dry_run: bool,
    progress: &ThrottledProgress,
) -> Result<ApplyResult> {
    let total = plan.renames.len() as u64;
    let mut renamed = 0u64;

    for (i, pair) in plan.renames.iter().enumerate() {
        if dry_run {
            info!(from = %pair.original.display(), to = %pair.new.display(), "would rename");
        } else {
            if fs::symlink_metadata(&pair.new).is_ok() {
                return Err(Error::TargetExists {
                    path: pair.new.clone(),
                });
            }
            fs::rename(&pair.original, &pair.new).map_err(|source| Error::Rename {
                from: pair.original.clone(),
                to: pair.new.clone(),
                source,
            })?;
            info!(from = %pair.original.display(), to = %pair.new.display(), "renamed");
        }
        renamed += 1;
        progress.report("rename", i as u64, total, "Renaming files");
    }

    Ok(ApplyResult { renamed, dry_run })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairs::RenamePair;
    use std::path::Path;

    fn noop(_: &str, _: u64, _: u64, _: &str) {}

    fn plan_for(dir: &Path, renames: &[(&str, &str)]) -> RenamePlan {
        RenamePlan {
            renames: renames
                .iter()
                .map(|(from, to)| RenamePair {
                    original: dir.join(from),
                    new: dir.join(to),
                })
                .collect(),
            ..RenamePlan::default()
        }
    }

    #[test]
    fn test_apply_renames_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("a.txt"), "a").unwrap();
        fs::write(dir.join("b.txt"), "b").unwrap();
        let plan = plan_for(dir, &[("a.txt", "file_2022-01-01.txt"), ("b.txt", "file_2022-02-02.txt")]);

        let tp = ThrottledProgress::new(&noop);
        let result = apply_plan(&plan, false, &tp).unwrap();
        assert_eq!(result.renamed, 2);
        assert!(!dir.join("a.txt").exists());
        assert_eq!(fs::read_to_string(dir.join("file_2022-01-01.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dir.join("file_2022-02-02.txt")).unwrap(), "b");
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("a.txt"), "a").unwrap();
        let plan = plan_for(dir, &[("a.txt", "file_2022-01-01.txt")]);

        let tp = ThrottledProgress::new(&noop);
        let result = apply_plan(&plan, true, &tp).unwrap();
        assert_eq!(result, ApplyResult { renamed: 1, dry_run: true });
        assert!(dir.join("a.txt").exists());
        assert!(!dir.join("file_2022-01-01.txt").exists());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("a.txt"), "a").unwrap();
        fs::write(dir.join("file_2022-01-01.txt"), "late").unwrap();
        let plan = plan_for(dir, &[("a.txt", "file_2022-01-01.txt")]);

        let tp = ThrottledProgress::new(&noop);
        let err = apply_plan(&plan, false, &tp).unwrap_err();
        assert!(matches!(err, Error::TargetExists { .. }));
        assert_eq!(fs::read_to_string(dir.join("file_2022-01-01.txt")).unwrap(), "late");
    }

    #[test]
    fn test_missing_source_is_rename_error() {
        let tmp = tempfile::tempdir().unwrap();
        let plan = plan_for(tmp.path(), &[("gone.txt", "file_2022-01-01.txt")]);
        let tp = ThrottledProgress::new(&noop);
        assert!(matches!(apply_plan(&plan, false, &tp), Err(Error::Rename { .. })));
    }
}
