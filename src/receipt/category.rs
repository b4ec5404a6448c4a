//! Category suggestion from receipt keywords

/// Keyword to category, checked in this order; the first hit wins
const KEYWORDS: &[(&str, &str)] = &[
    // Food & Dining
    ("restaurant", "Food & Dining"),
    ("food", "Food & Dining"),
    ("dining", "Food & Dining"),
    ("cafe", "Food & Dining"),
    ("coffee", "Food & Dining"),
    ("pizza", "Food & Dining"),
    ("burger", "Food & Dining"),
    ("meal", "Food & Dining"),
    ("breakfast", "Food & Dining"),
    ("lunch", "Food & Dining"),
    ("dinner", "Food & Dining"),
    // Must precede "gas"
    ("gas bill", "Utilities"),
    // Transportation
    ("uber", "Transportation"),
    ("lyft", "Transportation"),
    ("taxi", "Transportation"),
    ("cab", "Transportation"),
    ("gas", "Transportation"),
    ("petrol", "Transportation"),
    ("fuel", "Transportation"),
    ("parking", "Transportation"),
    ("metro", "Transportation"),
    ("bus", "Transportation"),
    ("train", "Transportation"),
    ("subway", "Transportation"),
    ("airport", "Transportation"),
    // Shopping
    ("amazon", "Shopping"),
    ("walmart", "Shopping"),
    ("target", "Shopping"),
    ("store", "Shopping"),
    ("shop", "Shopping"),
    ("mall", "Shopping"),
    ("retail", "Shopping"),
    ("clothing", "Shopping"),
    ("shoes", "Shopping"),
    ("electronics", "Shopping"),
    // Entertainment
    ("movie", "Entertainment"),
    ("cinema", "Entertainment"),
    ("theater", "Entertainment"),
    ("concert", "Entertainment"),
    ("netflix", "Entertainment"),
    ("spotify", "Entertainment"),
    ("game", "Entertainment"),
    // Healthcare
    ("pharmacy", "Healthcare"),
    ("medical", "Healthcare"),
    ("doctor", "Healthcare"),
    ("hospital", "Healthcare"),
    ("clinic", "Healthcare"),
    ("medicine", "Healthcare"),
    // Utilities
    ("electric", "Utilities"),
    ("water", "Utilities"),
    ("internet", "Utilities"),
    ("phone", "Utilities"),
    ("mobile", "Utilities"),
    // Education
    ("book", "Education"),
    ("course", "Education"),
    ("tuition", "Education"),
    ("school", "Education"),
    ("university", "Education"),
    // Travel
    ("hotel", "Travel"),
    ("flight", "Travel"),
    ("airline", "Travel"),
    ("booking", "Travel"),
    ("reservation", "Travel"),
];

/// Suggest a category name from keywords anywhere in the text
pub fn suggest_category(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
}
