//! Built-in block catalog
//!
//! The declaration order here is the canonical registry order: it drives the
//! editor palette and the order in which fragments appear in a compiled
//! query.

use super::block::{BlockDefinition, InputType};
use crate::categories::BlockCategory;

/// Block type identifiers
pub mod types {
    pub const ALL_WORDS: &str = "all-words";
    pub const EXACT_PHRASE: &str = "exact-phrase";
    pub const OR: &str = "or";
    pub const NONE_WORDS: &str = "none-words";
    pub const HASHTAGS: &str = "hashtags";

    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const MENTION: &str = "mention";
    pub const LIST: &str = "list";

    pub const FILTER_MEDIA: &str = "filter-media";
    pub const FILTER_IMAGES: &str = "filter-images";
    pub const FILTER_VIDEO: &str = "filter-video";
    pub const FILTER_LINKS: &str = "filter-links";
    pub const URL: &str = "url";

    pub const SINCE: &str = "since";
    pub const UNTIL: &str = "until";

    pub const MIN_RETWEETS: &str = "min-retweets";
    pub const MIN_FAVES: &str = "min-faves";
    pub const MIN_REPLIES: &str = "min-replies";
    pub const NO_RETWEETS: &str = "no-retweets";
    pub const QUESTION: &str = "question";
}

/// Types whose fragments are emitted ahead of every other block.
pub const KEYWORD_TYPES: [&str; 5] = [
    types::ALL_WORDS,
    types::EXACT_PHRASE,
    types::OR,
    types::NONE_WORDS,
    types::HASHTAGS,
];

/// Whether `block_type` belongs to the keyword class
pub fn is_keyword_type(block_type: &str) -> bool {
    KEYWORD_TYPES.contains(&block_type)
}

/// Every built-in block definition, in registry order
pub fn builtin_definitions() -> Vec<BlockDefinition> {
    use BlockCategory::*;

    const USERNAMES: &str = "Enter space-separated usernames";

    vec![
        // Keywords
        BlockDefinition::new(types::ALL_WORDS, "All of these words", Keyword, true)
            .with_placeholder("Enter space-separated words"),
        BlockDefinition::new(types::EXACT_PHRASE, "Exact Phrase", Keyword, true)
            .with_placeholder("Enter exact phrase"),
        BlockDefinition::new(types::OR, "Any of these words (OR)", Keyword, true)
            .with_placeholder("Enter space-separated words/phrases"),
        BlockDefinition::new(types::NONE_WORDS, "None of these words", Keyword, true)
            .with_placeholder("Enter space-separated words to exclude"),
        BlockDefinition::new(types::HASHTAGS, "These Hashtags", Keyword, true)
            .with_placeholder("Enter space-separated hashtags (without #)"),
        // Users
        BlockDefinition::new(types::FROM, "From these Accounts", User, true)
            .with_placeholder(USERNAMES),
        BlockDefinition::new(types::TO, "To these Accounts", User, true)
            .with_placeholder(USERNAMES),
        BlockDefinition::new(types::MENTION, "Mentioning these Accounts", User, true)
            .with_placeholder(USERNAMES),
        BlockDefinition::new(types::LIST, "List", User, true).with_placeholder("username/listname"),
        // Media
        BlockDefinition::new(types::FILTER_MEDIA, "Has Media", Media, false),
        BlockDefinition::new(types::FILTER_IMAGES, "Has Images", Media, false),
        BlockDefinition::new(types::FILTER_VIDEO, "Has Videos", Media, false),
        BlockDefinition::new(types::FILTER_LINKS, "Has Links", Media, false),
        BlockDefinition::new(types::URL, "URL Contains", Media, true).with_placeholder("URL text"),
        // Dates
        BlockDefinition::new(types::SINCE, "Since Date", Date, true)
            .with_placeholder("YYYY-MM-DD")
            .with_input_type(InputType::Date),
        BlockDefinition::new(types::UNTIL, "Until Date", Date, true)
            .with_placeholder("YYYY-MM-DD")
            .with_input_type(InputType::Date),
        // Engagement
        BlockDefinition::new(types::MIN_RETWEETS, "Min Retweets", Engagement, true)
            .with_placeholder("Number")
            .with_input_type(InputType::Number),
        BlockDefinition::new(types::MIN_FAVES, "Min Likes", Engagement, true)
            .with_placeholder("Number")
            .with_input_type(InputType::Number),
        BlockDefinition::new(types::MIN_REPLIES, "Min Replies", Engagement, true)
            .with_placeholder("Number")
            .with_input_type(InputType::Number),
        BlockDefinition::new(types::NO_RETWEETS, "No Retweets", Engagement, false),
        BlockDefinition::new(types::QUESTION, "Is Question", Engagement, false),
    ]
}
