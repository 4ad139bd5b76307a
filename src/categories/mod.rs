//! Block categories and classification
//!
//! Every block type belongs to exactly one of five fixed categories. The
//! category drives editor grouping only; query output ordering is decided by
//! the keyword class (see [`crate::compiler`]).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    /// Textual content matching (words, phrases, hashtags)
    Keyword,
    /// Author, recipient, mention and list filters
    User,
    /// Media, link and URL filters
    Media,
    /// Date ranges
    Date,
    /// Engagement thresholds and tweet shape
    Engagement,
}

impl BlockCategory {
    /// All categories in palette order.
    pub const ALL: [BlockCategory; 5] = [
        BlockCategory::Keyword,
        BlockCategory::User,
        BlockCategory::Media,
        BlockCategory::Date,
        BlockCategory::Engagement,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Keyword => "keyword",
            BlockCategory::User => "user",
            BlockCategory::Media => "media",
            BlockCategory::Date => "date",
            BlockCategory::Engagement => "engagement",
        }
    }

    /// Section title shown above the category's blocks
    pub fn title(&self) -> &'static str {
        match self {
            BlockCategory::Keyword => "Keywords & Phrases",
            BlockCategory::User => "User-Related",
            BlockCategory::Media => "Media & Links",
            BlockCategory::Date => "Date Ranges",
            BlockCategory::Engagement => "Engagement & Sentiment",
        }
    }

    /// Accent color used by editors to tint the category's blocks
    pub fn palette(&self) -> &'static str {
        match self {
            BlockCategory::Keyword => "blue",
            BlockCategory::User => "green",
            BlockCategory::Media => "purple",
            BlockCategory::Date => "orange",
            BlockCategory::Engagement => "red",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown block category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for BlockCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(BlockCategory::Keyword),
            "user" => Ok(BlockCategory::User),
            "media" => Ok(BlockCategory::Media),
            "date" => Ok(BlockCategory::Date),
            "engagement" => Ok(BlockCategory::Engagement),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}
