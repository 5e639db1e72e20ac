pub mod apply;
pub mod date;
pub mod error;
pub mod name;
pub mod pairs;
pub mod plan;
pub mod progress;
pub mod scan;

#[cfg(test)]
mod test_support;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use date::{DateOptions, DateResult, DateSource};
pub use error::{Error, Result};
pub use name::{compute_new_filename, compute_new_filename_with, FILE_PREFIX};
pub use pairs::{collect_pairs_parallel, get_filename_pairs, get_filename_pairs_with, FilenamePairs, RenamePair};
pub use plan::{plan_renames, RenamePlan};
pub use progress::{ProgressCallback, ThrottledProgress};
pub use scan::{enumerate_files, Files};

fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOptions {
    pub roots: Vec<PathBuf>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default)]
    pub date: DateOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameResult {
    pub total_files: u64,
    pub renamed: u64,
    pub unchanged: u64,
    pub collisions_resolved: u64,
    #[serde(default)]
    pub dry_run: bool,
}

/// Run the full pipeline: pair, plan, rename.
pub fn process(options: &RenameOptions, progress_callback: &ProgressCallback) -> Result<RenameResult> {
    let tp = ThrottledProgress::new(progress_callback);

    // Stage 1: enumerate and compute names
    let pairs = if options.parallel {
        collect_pairs_parallel(&options.roots, &options.date)?
    } else {
        get_filename_pairs_with(&options.roots, options.date).collect::<Result<Vec<_>>>()?
    };
    let total_files = pairs.len() as u64;
    if total_files > 0 {
        tp.report("scan", total_files - 1, total_files, "Dates resolved");
    }

    // Stage 2: resolve collisions
    let plan = plan_renames(pairs);
    if plan.collisions > 0 {
        info!(collisions = plan.collisions, "suffixed colliding targets");
    }

    // Stage 3: rename
    let applied = apply::apply_plan(&plan, options.dry_run, &tp)?;

    let result = RenameResult {
        total_files,
        renamed: applied.renamed,
        unchanged: plan.unchanged.len() as u64,
        collisions_resolved: plan.collisions,
        dry_run: options.dry_run,
    };
    info!(
        total = result.total_files,
        renamed = result.renamed,
        unchanged = result.unchanged,
        dry_run = result.dry_run,
        "done"
    );
    Ok(result)
}
