//! Date detection
//!
//! Recognizes common printed date forms anywhere in the text. The match that
//! starts earliest wins; a match that isn't a real calendar date is passed
//! over in favour of the next one.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

const MONTHS: &str = "jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec";

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b").expect("iso date regex")
    })
}

fn numeric_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})\b").expect("numeric date regex")
    })
}

fn month_day_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\b({MONTHS})[a-z]*\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?,?\s+(\d{{4}})\b"
        ))
        .expect("month-day-year regex")
    })
}

fn day_month_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+({MONTHS})[a-z]*\.?,?\s+(\d{{4}})\b"
        ))
        .expect("day-month-year regex")
    })
}

/// Find the first real date in OCR text
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    let detectors: [(&Regex, fn(&Captures) -> Option<NaiveDate>); 4] = [
        (iso_re(), from_iso),
        (numeric_re(), from_numeric),
        (month_day_year_re(), from_month_day_year),
        (day_month_year_re(), from_day_month_year),
    ];

    let mut candidates: Vec<(usize, NaiveDate)> = Vec::new();
    for (re, build) in detectors {
        for caps in re.captures_iter(text) {
            let start = caps.get(0).map_or(0, |m| m.start());
            if let Some(date) = build(&caps) {
                candidates.push((start, date));
            }
        }
    }

    // Stable sort keeps detector order for matches starting at the same offset
    candidates.sort_by_key(|(start, _)| *start);
    candidates.into_iter().next().map(|(_, date)| date)
}

fn number<T: std::str::FromStr>(caps: &Captures, index: usize) -> Option<T> {
    caps.get(index)?.as_str().parse().ok()
}

fn full_year(caps: &Captures, index: usize) -> Option<i32> {
    let text = caps.get(index)?.as_str();
    let year: i32 = text.parse().ok()?;
    Some(if text.len() == 2 { 2000 + year } else { year })
}

fn month_number(caps: &Captures, index: usize) -> Option<u32> {
    let name = caps.get(index)?.as_str().to_lowercase();
    MONTHS
        .split('|')
        .position(|m| m == name)
        .map(|i| i as u32 + 1)
}

fn from_iso(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, 1)?, number(caps, 2)?, number(caps, 3)?)
}

/// Month first unless the first number can only be a day
fn from_numeric(caps: &Captures) -> Option<NaiveDate> {
    let first: u32 = number(caps, 1)?;
    let second: u32 = number(caps, 2)?;
    let year = full_year(caps, 3)?;

    let (month, day) = if first > 12 {
        (second, first)
    } else {
        (first, second)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn from_month_day_year(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, 3)?, month_number(caps, 1)?, number(caps, 2)?)
}

fn from_day_month_year(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(number(caps, 3)?, month_number(caps, 2)?, number(caps, 1)?)
}
