use std::path::Path;

use chrono::{Local, NaiveDate};
use filetime::FileTime;

/// Pin the mtime of `path` to local noon on the given day.
pub fn set_mtime(path: &Path, year: i32, month: u32, day: u32) {
    let local = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .and_then(|dt| dt.and_local_timezone(Local).single())
        .unwrap();
    filetime::set_file_mtime(path, FileTime::from_unix_time(local.timestamp(), 0)).unwrap();
}

/// Minimal JPEG whose EXIF block holds only `DateTimeOriginal`.
///
/// `datetime` is the 19-char EXIF form, e.g. `2019:05:09 15:47:33`.
pub fn jpeg_with_date_time_original(datetime: &str) -> Vec<u8> {
    assert_eq!(datetime.len(), 19);

    // Little-endian TIFF: IFD0 at 8 points to the Exif IFD at 26, whose one
    // ASCII entry points to the string at 44.
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes()); // ExifIFDPointer
    tiff.extend_from_slice(&4u16.to_le_bytes()); // LONG
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes()); // DateTimeOriginal
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&20u32.to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(datetime.as_bytes());
    tiff.push(0);
    assert_eq!(tiff.len(), 64);

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}
