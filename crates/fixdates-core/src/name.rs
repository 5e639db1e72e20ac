use std::ffi::{OsStr, OsString};
use std::path::Path;

use chrono::NaiveDate;

use crate::date::{self, DateOptions};
use crate::error::Result;

/// Literal prefix of every generated name.
pub const FILE_PREFIX: &str = "file_";

/// `file_YYYY-MM-DD` plus the extension with its dot, if any.
pub fn build_filename(date: NaiveDate, extension: Option<&OsStr>) -> OsString {
    let mut name = OsString::from(format!("{}{}", FILE_PREFIX, date.format("%Y-%m-%d")));
    if let Some(ext) = extension {
        name.push(".");
        name.push(ext);
    }
    name
}

/// New filename for `path` using the default date sources.
pub fn compute_new_filename(path: &Path) -> Result<OsString> {
    compute_new_filename_with(path, &DateOptions::default())
}

/// New filename for `path`. The original stem is dropped; only the date and
/// the last extension survive. Nothing on disk is modified.
pub fn compute_new_filename_with(path: &Path, options: &DateOptions) -> Result<OsString> {
    let resolved = date::resolve_date(path, options)?;
    Ok(build_filename(resolved.date, path.extension()))
}
