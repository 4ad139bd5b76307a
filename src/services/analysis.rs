//! Tweet analysis payload and analyzer contract
//!
//! Analysis is best-effort enrichment: callers get a fixed placeholder
//! instead of an error when the analyzer fails or there is nothing to
//! analyze.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ServiceError;
use super::tweets::Tweet;

/// Produces an analysis of the tweets returned for a query
#[async_trait]
pub trait TweetAnalyzer: Send + Sync {
    async fn analyze(&self, query: &str, tweets: &[Tweet]) -> Result<Analysis, ServiceError>;
}

/// Analysis of a tweet list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Always a single label, even when the service answers with a list
    #[serde(default = "neutral", deserialize_with = "single_sentiment")]
    pub sentiment: String,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_questions: Option<Vec<String>>,
}

fn neutral() -> String {
    "neutral".into()
}

fn single_sentiment<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .next()
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(neutral),
        _ => neutral(),
    })
}

impl Analysis {
    /// Placeholder when the search returned no tweets
    pub fn empty() -> Self {
        Self {
            summary: "No tweets found to analyze.".into(),
            topics: Vec::new(),
            sentiment: neutral(),
            insights: vec!["No data available for analysis".into()],
            related_questions: Some(Vec::new()),
        }
    }

    /// Placeholder when the analyzer failed
    pub fn unavailable() -> Self {
        Self {
            summary: "An error occurred during analysis.".into(),
            topics: Vec::new(),
            sentiment: "unknown".into(),
            insights: vec!["Analysis service temporarily unavailable".into()],
            related_questions: Some(Vec::new()),
        }
    }

    /// Parse an analyzer's JSON answer
    pub fn parse(payload: &str) -> Result<Self, ServiceError> {
        Ok(serde_json::from_str(payload)?)
    }
}

pub const ANALYSIS_SYSTEM_PROMPT: &str = "You analyze search results from a social network. \
Answer with a single JSON object with the keys: \
\"summary\" (string, two or three sentences), \
\"topics\" (array of short strings), \
\"sentiment\" (one of \"positive\", \"negative\", \"neutral\", \"mixed\"), \
\"insights\" (array of strings), \
\"relatedQuestions\" (array of follow-up questions a researcher might ask).";

/// User prompt listing the tweets under the query they answered
pub fn analysis_prompt(query: &str, tweets: &[Tweet]) -> String {
    let tweet_texts = tweets
        .iter()
        .map(|t| format!("Tweet by {} (@{}): \"{}\"", t.user_name, t.user_screen_name, t.text))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Search query: {}\n\nTweets:\n{}\n\nAnalyze these tweets.",
        query, tweet_texts
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub use http::OpenAiAnalyzer;

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use async_trait::async_trait;

    use super::{analysis_prompt, Analysis, TweetAnalyzer, ANALYSIS_SYSTEM_PROMPT};
    use crate::services::config::ServiceConfig;
    use crate::services::error::ServiceError;
    use crate::services::openai::{ChatClient, Completion};
    use crate::services::tweets::Tweet;

    const ANALYSIS_COMPLETION: Completion = Completion {
        temperature: 0.2,
        max_tokens: 1000,
    };

    /// Analyzer backed by a chat-completion model
    pub struct OpenAiAnalyzer {
        chat: ChatClient,
    }

    impl OpenAiAnalyzer {
        pub fn new(config: &ServiceConfig) -> Self {
            Self {
                chat: ChatClient::new(config),
            }
        }
    }

    #[async_trait]
    impl TweetAnalyzer for OpenAiAnalyzer {
        async fn analyze(&self, query: &str, tweets: &[Tweet]) -> Result<Analysis, ServiceError> {
            if tweets.is_empty() {
                return Ok(Analysis::empty());
            }

            let content = self
                .chat
                .complete_json(
                    ANALYSIS_SYSTEM_PROMPT,
                    &analysis_prompt(query, tweets),
                    ANALYSIS_COMPLETION,
                )
                .await
                .map_err(|e| ServiceError::Analysis(e.to_string()))?;

            Analysis::parse(&content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_array_coerced_to_first() {
        let analysis = Analysis::parse(
            r#"{"summary":"s","topics":["a"],"sentiment":["positive","mixed"],"insights":[]}"#,
        )
        .unwrap();
        assert_eq!(analysis.sentiment, "positive");
        assert_eq!(analysis.related_questions, None);
    }

    #[test]
    fn test_empty_sentiment_array_is_neutral() {
        let analysis = Analysis::parse(r#"{"summary":"s","sentiment":[]}"#).unwrap();
        assert_eq!(analysis.sentiment, "neutral");
        assert!(analysis.topics.is_empty());
    }

    #[test]
    fn test_missing_sentiment_is_neutral() {
        let analysis = Analysis::parse(r#"{"summary":"s"}"#).unwrap();
        assert_eq!(analysis.sentiment, "neutral");
    }

    #[test]
    fn test_unparsable_payload() {
        assert!(matches!(
            Analysis::parse("{oops"),
            Err(ServiceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(Analysis::empty().sentiment, "neutral");
        assert_eq!(Analysis::unavailable().sentiment, "unknown");
        assert_eq!(
            Analysis::unavailable().insights,
            vec!["Analysis service temporarily unavailable".to_string()]
        );
    }

    #[test]
    fn test_related_questions_serialized_camel_case() {
        let json = serde_json::to_value(Analysis::empty()).unwrap();
        assert_eq!(json["relatedQuestions"], serde_json::json!([]));
    }

    #[test]
    fn test_prompt_lists_tweets() {
        let tweets = vec![Tweet {
            id: "1".into(),
            user_name: "NASA".into(),
            user_screen_name: "nasa".into(),
            text: "Liftoff".into(),
            created_at: String::new(),
            retweet_count: 0,
            favorite_count: 0,
            reply_count: 0,
            user_profile_image_url: None,
        }];
        let prompt = analysis_prompt("from:nasa", &tweets);
        assert!(prompt.contains("Search query: from:nasa"));
        assert!(prompt.contains("Tweet by NASA (@nasa): \"Liftoff\""));
    }
}
