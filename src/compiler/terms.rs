//! Value splitting helpers shared by the rendering rules.
//!
//! Values are split on any run of whitespace and empty tokens are dropped, so
//! `"a   b"` and `"a b"` render identically.

/// Whitespace-separated tokens of a value
pub fn split_terms(value: &str) -> Vec<&str> {
    value.split_whitespace().collect()
}

/// The trimmed value, or `None` when nothing but whitespace remains
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Value wrapped as `<prefix><trimmed value>`
pub fn tagged(prefix: &str, value: &str) -> Option<String> {
    non_blank(value).map(|v| format!("{}{}", prefix, v))
}

/// Every term prefixed, rejoined with single spaces
pub fn prefixed_terms(prefix: &str, value: &str) -> Option<String> {
    let terms = split_terms(value);
    if terms.is_empty() {
        return None;
    }

    Some(
        terms
            .iter()
            .map(|t| format!("{}{}", prefix, t))
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Every term prefixed and joined by ` OR ` inside parentheses.
///
/// A single term is still parenthesized.
pub fn any_of(prefix: &str, value: &str) -> Option<String> {
    let terms = split_terms(value);
    if terms.is_empty() {
        return None;
    }

    let alternatives = terms
        .iter()
        .map(|t| format!("{}{}", prefix, t))
        .collect::<Vec<_>>()
        .join(" OR ");

    Some(format!("({})", alternatives))
}
