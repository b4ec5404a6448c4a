//! Merchant detection
//!
//! The store name is usually the first line of a receipt that isn't a date,
//! a price, or a column heading.

use std::sync::OnceLock;

use regex::Regex;

fn skip_res() -> &'static [Regex; 3] {
    static RES: OnceLock<[Regex; 3]> = OnceLock::new();
    RES.get_or_init(|| {
        [
            Regex::new(r"^\d+/\d+/\d+").expect("date line regex"),
            Regex::new(r"^\$?\d+\.\d{2}").expect("amount line regex"),
            Regex::new(r"^(total|subtotal|tax|cash|credit|debit|qty|item|price|amount)")
                .expect("boilerplate line regex"),
        ]
    })
}

/// First plausible merchant line in OCR text
pub fn extract_merchant(text: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .split(|c: char| c == '\n' || c == '\r')
        .map(str::trim)
        .collect();

    lines
        .iter()
        .find(|line| line.chars().count() >= 3 && !looks_like_boilerplate(line))
        .or_else(|| lines.iter().find(|line| line.chars().count() > 3))
        .map(|line| line.to_string())
}

fn looks_like_boilerplate(line: &str) -> bool {
    let lower = line.to_lowercase();
    skip_res().iter().any(|re| re.is_match(&lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        let text = "Blue Bottle Coffee\n123 Main St\nTotal $4.50";
        assert_eq!(extract_merchant(text).as_deref(), Some("Blue Bottle Coffee"));
    }

    #[test]
    fn test_skips_dates_amounts_and_headings() {
        let text = "  \nAB\n03/15/2026\n$4.50\nTOTAL 4.50\nQty Item Price\n  Corner Deli  \n";
        assert_eq!(extract_merchant(text).as_deref(), Some("Corner Deli"));
    }

    #[test]
    fn test_fallback_to_first_long_line() {
        let text = "12.00\nTotal 12.00\nCash";
        assert_eq!(extract_merchant(text).as_deref(), Some("12.00"));
    }

    #[test]
    fn test_nothing_usable() {
        assert_eq!(extract_merchant("ab\n\nxyz"), Some("xyz".to_string()));
        assert_eq!(extract_merchant("ab\n\n"), None);
        assert_eq!(extract_merchant("tax"), None);
    }
}
