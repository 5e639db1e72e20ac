use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

const MONTHS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

struct DatePattern {
    regex: &'static LazyLock<Regex>,
    parse: fn(&Captures) -> Option<NaiveDate>,
}

// "January 1, 2022", "jan_01_2022", "Sept 3rd 2021"
static RE_MONTH_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^a-z])(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)[ ._-]*(?P<day>\d{1,2})(?:st|nd|rd|th)?,?[ ._-]*(?P<year>(?:20|19|18)\d{2})(?:$|\D)",
    )
    .unwrap()
});
// "2022-01-01", also what we produce
static RE_ISO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(?P<year>(20|19|18)\d{2})-(?P<month>0[1-9]|1[0-2])-(?P<day>[0-3]\d)(?:$|\D)").unwrap()
});
// "Screenshot_20190919-053857", "IMG_20190509_154733"
static RE_CAMERA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\D)(?P<year>(20|19|18)\d{2})(?P<month>0[1-9]|1[0-2])(?P<day>[0-3]\d)[-_]\d{6}(?:$|\D)").unwrap()
});

static PATTERNS: &[DatePattern] = &[
    DatePattern { regex: &RE_MONTH_NAME, parse: parse_month_name },
    DatePattern { regex: &RE_ISO, parse: parse_numeric },
    DatePattern { regex: &RE_CAMERA, parse: parse_numeric },
];

fn parse_month_name(caps: &Captures) -> Option<NaiveDate> {
    let month = caps.name("month")?.as_str().to_ascii_lowercase();
    let month = MONTHS.iter().position(|m| month.starts_with(m))? as u32 + 1;
    let day = caps.name("day")?.as_str().parse().ok()?;
    let year = caps.name("year")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_numeric(caps: &Captures) -> Option<NaiveDate> {
    let year = caps.name("year")?.as_str().parse().ok()?;
    let month = caps.name("month")?.as_str().parse().ok()?;
    let day = caps.name("day")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Find a date written into the basename of `filename`.
///
/// Patterns are tried in order and the first calendar-valid match wins, so
/// `February 30, 2022 - March 1, 2022` resolves to March 1.
pub fn guess_date_from_filename(filename: &str) -> Option<NaiveDate> {
    let basename = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    for pat in PATTERNS {
        // Matches consume one boundary char, so overlapping candidates are
        // found by resuming right after the previous match start.
        let mut start = 0;
        while let Some(caps) = pat.regex.captures_at(basename, start) {
            if let Some(date) = (pat.parse)(&caps) {
                return Some(date);
            }
            let Some(m) = caps.get(0) else { break };
            start = next_char_boundary(basename, m.start());
        }
    }

    None
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < s.len() && !s.is_char_boundary(next) {
        next += 1;
    }
    next
}
