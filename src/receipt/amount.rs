//! Amount detection
//!
//! Lines mentioning a total-like word outrank other lines. Within a rank the
//! first line that yields a number wins, even if a later one is larger.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Money;

const TOTAL_KEYWORDS: &[&str] = &["total", "subtotal", "amount", "sum", "pay", "due", "balance"];

fn currency_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[$₹€£¥]\s*(\d+(?:,\d{3})*\.\d{1,2})").expect("currency prefix regex")
    })
}

fn currency_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:,\d{3})*\.\d{1,2})\s*[$₹€£¥]").expect("currency suffix regex")
    })
}

fn bare_decimal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(?:,\d{3})*\.\d+)").expect("bare decimal regex"))
}

/// Pick the receipt total from OCR text
pub fn extract_amount(text: &str) -> Option<Money> {
    let mut best: Option<(u8, Money)> = None;

    for line in text.split(|c: char| c == '\n' || c == '\r') {
        let line = line.trim();
        let priority = line_priority(line);

        if best.is_some_and(|(current, _)| priority <= current) {
            continue;
        }

        if let Some(amount) = first_amount(line) {
            best = Some((priority, amount));
        }
    }

    best.map(|(_, amount)| amount)
}

fn line_priority(line: &str) -> u8 {
    let lower = line.to_lowercase();
    if TOTAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        2
    } else {
        1
    }
}

/// First number on the line, trying currency-marked forms before bare ones
fn first_amount(line: &str) -> Option<Money> {
    [currency_prefix_re(), currency_suffix_re(), bare_decimal_re()]
        .into_iter()
        .flat_map(|re| re.captures_iter(line))
        .filter_map(|caps| caps.get(1))
        .find_map(|m| Money::parse(&m.as_str().replace(',', "")).ok())
}
