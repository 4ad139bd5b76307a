//! Outbound search URL construction

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default search front-end
pub const DEFAULT_SEARCH_BASE: &str = "https://x.com";

/// Result ordering requested from the search engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Newest first
    #[default]
    Latest,
    /// Ranked by relevance
    Top,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Latest => "latest",
            SearchMode::Top => "top",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SearchMode::Latest),
            "top" => Ok(SearchMode::Top),
            other => Err(format!("Unknown search mode: '{}'", other)),
        }
    }
}

/// Search page URL for a compiled query, or `None` when there is nothing
/// to search for.
///
/// # Example
/// ```
/// use search_blocks::services::search_url::{search_url, SearchMode};
///
/// let url = search_url("https://x.com", "from:nasa", SearchMode::Top).unwrap();
/// assert_eq!(url, "https://x.com/search?q=from%3Anasa&src=typed_query");
/// ```
pub fn search_url(base: &str, query: &str, mode: SearchMode) -> Option<String> {
    if query.trim().is_empty() {
        return None;
    }

    let mut url = format!(
        "{}/search?q={}&src=typed_query",
        base.trim_end_matches('/'),
        urlencoding::encode(query)
    );
    if mode == SearchMode::Latest {
        url.push_str("&f=live");
    }
    Some(url)
}
