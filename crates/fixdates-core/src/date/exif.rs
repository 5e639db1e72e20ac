use chrono::NaiveDate;
use exif::{In, Reader, Tag};
use std::io::Cursor;

/// Extract the capture date from EXIF data in raw image bytes.
/// EXIF datetimes have no timezone info, so the date is taken as written.
pub fn extract_exif_date(bytes: &[u8]) -> Option<NaiveDate> {
    let reader = Reader::new().read_from_container(&mut Cursor::new(bytes)).ok()?;

    let tags = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

    for tag in &tags {
        if let Some(field) = reader.get_field(*tag, In::PRIMARY) {
            let val = field.display_value().to_string();
            if let Some(date) = parse_exif_date(&val) {
                return Some(date);
            }
        }
    }

    None
}

fn parse_exif_date(s: &str) -> Option<NaiveDate> {
    let cleaned = s
        .trim()
        .replace('-', ":")
        .replace('/', ":")
        .replace('\\', ":")
        .replace('.', ":");

    NaiveDate::parse_from_str(cleaned.split(' ').next()?, "%Y:%m:%d").ok()
}
