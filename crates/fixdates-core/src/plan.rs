use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pairs::RenamePair;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenamePlan {
    /// Renames to perform, targets unique and free at planning time.
    pub renames: Vec<RenamePair>,
    /// Files already carrying their computed name.
    pub unchanged: Vec<PathBuf>,
    /// Renames whose target had to be suffixed.
    pub collisions: u64,
}

fn exists_on_disk(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// `stem(n).ext` next to `target`.
fn suffixed(target: &Path, n: u32) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let mut name = std::ffi::OsString::from(format!("{}({})", stem, n));
    if let Some(ext) = target.extension() {
        name.push(".");
        name.push(ext);
    }
    target.with_file_name(name)
}

/// True when `path` already is `stem(n).ext` for some n next to `target`.
fn is_suffixed_form_of(path: &Path, target: &Path) -> bool {
    if path.parent() != target.parent() {
        return false;
    }
    let (Some(name), Some(stem)) = (
        path.file_name().and_then(|n| n.to_str()),
        target.file_stem().and_then(|s| s.to_str()),
    ) else {
        return false;
    };
    let rest = match target.extension() {
        None => Some(name),
        Some(ext) => ext
            .to_str()
            .and_then(|ext| name.strip_suffix(ext))
            .and_then(|r| r.strip_suffix('.')),
    };
    let Some(number) = rest
        .and_then(|r| r.strip_prefix(stem))
        .and_then(|r| r.strip_prefix('('))
        .and_then(|r| r.strip_suffix(')'))
    else {
        return false;
    };
    !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve target collisions (sequential, first pair wins the plain name).
///
/// Taken targets, whether claimed earlier in this plan or present on disk,
/// get `stem(n).ext` with the smallest free n. A file that already carries a
/// suffixed form of its target is left alone whatever its n, so reruns never
/// shuffle numbers. Repeated originals are planned once.
pub fn plan_renames<I>(pairs: I) -> RenamePlan
where
    I: IntoIterator<Item = RenamePair>,
{
    let mut plan = RenamePlan::default();
    // Per base target, avoids rescanning already used numbers.
    let mut name_counters: HashMap<PathBuf, u32> = HashMap::new();
    let mut used_paths: HashSet<PathBuf> = HashSet::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for pair in pairs {
        if !seen.insert(pair.original.clone()) {
            continue;
        }
        if pair.is_noop() || is_suffixed_form_of(&pair.original, &pair.new) {
            plan.unchanged.push(pair.original);
            continue;
        }

        let base = pair.new;
        let taken = |p: &Path, used: &HashSet<PathBuf>| used.contains(p) || exists_on_disk(p);

        if !taken(&base, &used_paths) {
            used_paths.insert(base.clone());
            plan.renames.push(RenamePair { original: pair.original, new: base });
            continue;
        }

        let counter = name_counters.entry(base.clone()).or_insert(0);
        let dest = loop {
            *counter += 1;
            let candidate = suffixed(&base, *counter);
            if !taken(&candidate, &used_paths) {
                break candidate;
            }
        };

        used_paths.insert(dest.clone());
        plan.collisions += 1;
        plan.renames.push(RenamePair { original: pair.original, new: dest });
    }

    plan
}
