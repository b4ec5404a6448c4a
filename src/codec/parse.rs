//! CSV parsing
//!
//! Quote-aware split of CSV text into rows of trimmed fields. Rows may have
//! differing field counts; the caller decides what a usable row is.
//!
//! Hand-edited files often put a space between the comma and an opening
//! quote (`a, "b,c"`). The `csv` reader only honours a quote as the first
//! byte of a field, so that padding is removed before the reader sees it.

use csv::{ReaderBuilder, Trim};
use tracing::debug;

/// Split CSV text into rows of fields
///
/// Line endings are normalized and a leading byte-order mark is dropped
/// before scanning. Blank lines produce no row. A final row without a
/// trailing newline is still returned.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let normalized = tighten_quoted_fields(&normalize(text));

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(normalized.as_bytes());

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                if record.iter().all(str::is_empty) {
                    continue;
                }
                rows.push(record.iter().map(str::to_string).collect());
            }
            Err(e) => {
                debug!(row = index + 1, error = %e, "unreadable CSV record");
            }
        }
    }

    rows
}

fn normalize(text: &str) -> String {
    text.strip_prefix('\u{feff}')
        .unwrap_or(text)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Drop unquoted blanks between a field boundary and a quoted value
fn tighten_quoted_fields(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut after_close = false;
    let mut blanks = String::new();

    while let Some(ch) = chars.next() {
        if in_quotes {
            output.push(ch);
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    output.push('"');
                } else {
                    in_quotes = false;
                    after_close = true;
                }
            }
            continue;
        }

        if ch == ' ' || ch == '\t' {
            if at_field_start || after_close {
                blanks.push(ch);
            } else {
                output.push(ch);
            }
            continue;
        }

        if ch == '"' && at_field_start {
            blanks.clear();
            in_quotes = true;
            at_field_start = false;
            output.push(ch);
            continue;
        }

        let boundary = ch == ',' || ch == '\n';
        if !(after_close && boundary) {
            output.push_str(&blanks);
        }
        blanks.clear();
        output.push(ch);
        at_field_start = boundary;
        after_close = false;
    }

    if !after_close {
        output.push_str(&blanks);
    }
    output
}
