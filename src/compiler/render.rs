//! Per-type rendering rules
//!
//! | Type | Fragment |
//! |------|----------|
//! | `all-words` | value verbatim |
//! | `exact-phrase` | `"value"` |
//! | `or` | `term` or `(a OR b ...)` |
//! | `none-words` | `-a -b ...` |
//! | `hashtags` | `#a #b ...` |
//! | `from` / `to` / `mention` | `(from:a OR ...)`, `(to:a OR ...)`, `(@a OR ...)` |
//! | `list` / `url` / `since` / `until` | `list:v`, `url:v`, `since:v`, `until:v` |
//! | `min-retweets` / `min-faves` / `min-replies` | `min_retweets:v`, `min_faves:v`, `min_replies:v` |
//! | `filter-media` / `filter-images` / `filter-links` | `filter:media`, `filter:images`, `filter:links` |
//! | `filter-video` | `filter:native_video` |
//! | `no-retweets` | `-filter:retweets` |
//! | `question` | `?` |
//!
//! Value-requiring rules yield `None` when the value has no non-whitespace
//! content; unknown types always yield `None`.

use super::terms::{any_of, non_blank, prefixed_terms, split_terms, tagged};
use crate::core::catalog::types;

/// Render one block to its query fragment.
///
/// `_value2` is accepted for two-valued block types; no current rule reads it.
pub fn render(block_type: &str, value: &str, _value2: Option<&str>) -> Option<String> {
    match block_type {
        types::ALL_WORDS => non_blank(value).map(str::to_string),
        types::EXACT_PHRASE => non_blank(value).map(|v| format!("\"{}\"", v)),
        types::OR => render_or(value),
        types::NONE_WORDS => prefixed_terms("-", value),
        types::HASHTAGS => prefixed_terms("#", value),

        types::FROM => any_of("from:", value),
        types::TO => any_of("to:", value),
        types::MENTION => any_of("@", value),
        types::LIST => tagged("list:", value),

        types::FILTER_MEDIA => Some("filter:media".into()),
        types::FILTER_IMAGES => Some("filter:images".into()),
        types::FILTER_VIDEO => Some("filter:native_video".into()),
        types::FILTER_LINKS => Some("filter:links".into()),
        types::URL => tagged("url:", value),

        types::SINCE => tagged("since:", value),
        types::UNTIL => tagged("until:", value),

        types::MIN_RETWEETS => tagged("min_retweets:", value),
        types::MIN_FAVES => tagged("min_faves:", value),
        types::MIN_REPLIES => tagged("min_replies:", value),
        types::NO_RETWEETS => Some("-filter:retweets".into()),
        types::QUESTION => Some("?".into()),

        _ => None,
    }
}

fn render_or(value: &str) -> Option<String> {
    match split_terms(value).as_slice() {
        [] => None,
        [single] => Some((*single).to_string()),
        terms => Some(format!("({})", terms.join(" OR "))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(block_type: &str, value: &str) -> Option<String> {
        render(block_type, value, None)
    }

    #[test]
    fn test_keyword_rules() {
        assert_eq!(r("all-words", "climate change").as_deref(), Some("climate change"));
        assert_eq!(r("exact-phrase", "happy birthday").as_deref(), Some("\"happy birthday\""));
        assert_eq!(r("or", "cats dogs").as_deref(), Some("(cats OR dogs)"));
        assert_eq!(r("or", "cats").as_deref(), Some("cats"));
        assert_eq!(r("or", ""), None);
        assert_eq!(r("none-words", "spam scam").as_deref(), Some("-spam -scam"));
        assert_eq!(r("hashtags", "rust  wasm").as_deref(), Some("#rust #wasm"));
    }

    #[test]
    fn test_user_rules() {
        assert_eq!(
            r("from", "elonmusk tesla").as_deref(),
            Some("(from:elonmusk OR from:tesla)")
        );
        assert_eq!(r("to", "nasa").as_deref(), Some("(to:nasa)"));
        assert_eq!(r("mention", "a b").as_deref(), Some("(@a OR @b)"));
        assert_eq!(r("list", "jack/tech").as_deref(), Some("list:jack/tech"));
        assert_eq!(r("from", "   "), None);
    }

    #[test]
    fn test_value_free_rules_ignore_value() {
        assert_eq!(r("filter-media", "").as_deref(), Some("filter:media"));
        assert_eq!(r("filter-images", "junk").as_deref(), Some("filter:images"));
        assert_eq!(r("filter-video", "").as_deref(), Some("filter:native_video"));
        assert_eq!(r("filter-links", "").as_deref(), Some("filter:links"));
        assert_eq!(r("no-retweets", "").as_deref(), Some("-filter:retweets"));
        assert_eq!(r("question", "").as_deref(), Some("?"));
    }

    #[test]
    fn test_prefixed_value_rules() {
        assert_eq!(r("url", "github.com").as_deref(), Some("url:github.com"));
        assert_eq!(r("since", "2024-03-20").as_deref(), Some("since:2024-03-20"));
        assert_eq!(r("until", "not-a-date").as_deref(), Some("until:not-a-date"));
        assert_eq!(r("min-retweets", "5").as_deref(), Some("min_retweets:5"));
        assert_eq!(r("min-faves", " 100 ").as_deref(), Some("min_faves:100"));
        assert_eq!(r("min-replies", "2").as_deref(), Some("min_replies:2"));
    }

    #[test]
    fn test_blank_values_omitted() {
        for block_type in ["all-words", "exact-phrase", "list", "url", "since", "until", "min-faves"] {
            assert_eq!(r(block_type, " \t "), None, "{} should be omitted", block_type);
        }
    }

    #[test]
    fn test_verbatim_values_trimmed() {
        assert_eq!(r("exact-phrase", " hi ").as_deref(), Some("\"hi\""));
        assert_eq!(r("all-words", "\tclimate  change ").as_deref(), Some("climate  change"));
    }

    #[test]
    fn test_unknown_type_omitted() {
        assert_eq!(r("lang", "en"), None);
        assert_eq!(r("", "x"), None);
    }

    #[test]
    fn test_second_value_ignored() {
        assert_eq!(render("min-faves", "10", Some("20")).as_deref(), Some("min_faves:10"));
    }
}
