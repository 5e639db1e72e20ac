pub mod exif;
pub mod guess;

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use filetime::FileTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Images larger than this are not read for EXIF.
const MAX_EXIF_READ: u64 = 32 * 1024 * 1024;

/// Where a date came from, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    Filename,
    Exif,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResult {
    pub date: NaiveDate,
    pub source: DateSource,
}

fn default_true() -> bool {
    true
}

/// Which date sources are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOptions {
    /// Look for a date written in the filename.
    #[serde(default = "default_true")]
    pub guess: bool,
    /// Read EXIF capture dates from image files.
    #[serde(default)]
    pub exif: bool,
    /// Fall back to the file's last-modified time.
    #[serde(default = "default_true")]
    pub modified: bool,
}

impl Default for DateOptions {
    fn default() -> Self {
        Self {
            guess: true,
            exif: false,
            modified: true,
        }
    }
}

/// Extract a date using all enabled methods in priority order.
pub fn extract_date(
    filename: &str,
    content: Option<&[u8]>,
    modified: Option<FileTime>,
    options: &DateOptions,
) -> Option<DateResult> {
    // 1. Filename
    if options.guess {
        if let Some(date) = guess::guess_date_from_filename(filename) {
            return Some(DateResult { date, source: DateSource::Filename });
        }
    }

    // 2. EXIF
    if options.exif {
        if let Some(bytes) = content {
            if let Some(date) = exif::extract_exif_date(bytes) {
                return Some(DateResult { date, source: DateSource::Exif });
            }
        }
    }

    // 3. mtime
    if options.modified {
        if let Some(date) = modified.and_then(modified_date) {
            return Some(DateResult { date, source: DateSource::Modified });
        }
    }

    None
}

/// Calendar date of a filesystem timestamp in the local timezone.
pub fn modified_date(ft: FileTime) -> Option<NaiveDate> {
    let utc = DateTime::from_timestamp(ft.unix_seconds(), ft.nanoseconds())?;
    Some(utc.with_timezone(&Local).date_naive())
}

/// Resolve the date of the file at `path`.
///
/// The file is stat'ed first, so a missing path is `NotFound` even when its
/// name carries a date.
pub fn resolve_date(path: &Path, options: &DateOptions) -> Result<DateResult> {
    let metadata = fs::metadata(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    let content = if options.exif && metadata.len() <= MAX_EXIF_READ && is_image(path) {
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "could not read content for EXIF");
                None
            }
        }
    } else {
        None
    };

    let modified = FileTime::from_last_modification_time(&metadata);

    let result = extract_date(&filename, content.as_deref(), Some(modified), options)
        .ok_or_else(|| Error::DateParse {
            path: path.to_path_buf(),
        })?;

    debug!(path = %path.display(), date = %result.date, source = ?result.source, "resolved date");
    Ok(result)
}

fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map_or(false, |mime| mime.type_() == mime_guess::mime::IMAGE)
}
