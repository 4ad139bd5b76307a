//! Tweet search: request parameters and response normalization
//!
//! Upstream records are loosely shaped (missing users, null counts, numeric
//! ids). They are normalized into a uniform [`Tweet`] before anything else
//! sees them.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::ServiceError;
use super::search_url::SearchMode;

pub const DEFAULT_LIMIT: u8 = 5;
pub const MIN_LIMIT: u8 = 1;
pub const MAX_LIMIT: u8 = 20;

/// Source of tweets for a compiled query
#[async_trait]
pub trait TweetSource: Send + Sync {
    async fn search(&self, request: &TweetQuery) -> Result<Vec<Tweet>, ServiceError>;
}

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TweetQuery {
    pub query: String,
    pub section: SearchMode,
    pub limit: u8,
}

/// Clamp a caller-supplied limit to `[1, 20]`.
///
/// Numbers and numeric strings are accepted; anything else, as well as zero,
/// falls back to the default of 5. Fractions are truncated.
pub fn clamp_limit(raw: Option<&serde_json::Value>) -> u8 {
    use serde_json::Value;

    let requested = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match requested {
        Some(n) if n.is_finite() && n != 0.0 => {
            n.trunc().clamp(MIN_LIMIT as f64, MAX_LIMIT as f64) as u8
        }
        _ => DEFAULT_LIMIT,
    }
}

/// Normalized tweet record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub user_name: String,
    pub user_screen_name: String,
    pub text: String,
    pub created_at: String,
    pub retweet_count: u64,
    pub favorite_count: u64,
    pub reply_count: u64,
    pub user_profile_image_url: Option<String>,
}

/// Search response as returned by the upstream API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSearch {
    #[serde(default)]
    pub results: Option<Vec<UpstreamTweet>>,
}

impl UpstreamSearch {
    /// Normalized tweets; a missing result list is an empty one
    pub fn into_tweets(self) -> Vec<Tweet> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .map(Tweet::from)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamTweet {
    #[serde(default, deserialize_with = "string_or_number")]
    pub tweet_id: String,
    #[serde(default)]
    pub user: Option<UpstreamUser>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub retweet_count: Option<u64>,
    #[serde(default)]
    pub favorite_count: Option<u64>,
    #[serde(default)]
    pub reply_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl From<UpstreamTweet> for Tweet {
    fn from(raw: UpstreamTweet) -> Self {
        let user = raw.user.unwrap_or_default();
        Self {
            id: raw.tweet_id,
            user_name: user.name.unwrap_or_else(|| "Unknown".into()),
            user_screen_name: user.username.unwrap_or_else(|| "unknown".into()),
            text: raw.text.unwrap_or_default(),
            created_at: raw.creation_date.unwrap_or_default(),
            retweet_count: raw.retweet_count.unwrap_or(0),
            favorite_count: raw.favorite_count.unwrap_or(0),
            reply_count: raw.reply_count.unwrap_or(0),
            user_profile_image_url: user.profile_pic_url,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub use http::RapidApiTweetSource;

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use async_trait::async_trait;
    use tracing::{debug, warn};

    use super::{Tweet, TweetQuery, TweetSource, UpstreamSearch};
    use crate::services::config::ServiceConfig;
    use crate::services::error::ServiceError;

    /// Tweet source backed by the RapidAPI search endpoint
    pub struct RapidApiTweetSource {
        http_client: reqwest::Client,
        base_url: String,
        host: String,
        api_key: String,
    }

    impl RapidApiTweetSource {
        pub fn new(config: &ServiceConfig) -> Self {
            let http_client = reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .unwrap_or_default();

            Self {
                http_client,
                base_url: format!("https://{}", config.rapidapi_host),
                host: config.rapidapi_host.clone(),
                api_key: config.rapidapi_key.clone(),
            }
        }

        /// Point the client at a different base URL (proxies, test servers)
        pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
            self.base_url = base_url.into();
            self
        }
    }

    #[async_trait]
    impl TweetSource for RapidApiTweetSource {
        async fn search(&self, request: &TweetQuery) -> Result<Vec<Tweet>, ServiceError> {
            let url = format!("{}/search/search", self.base_url.trim_end_matches('/'));
            debug!(query = %request.query, section = %request.section, limit = request.limit, "searching tweets");

            let limit = request.limit.to_string();
            let response = self
                .http_client
                .get(&url)
                .query(&[
                    ("query", request.query.as_str()),
                    ("section", request.section.as_str()),
                    ("limit", limit.as_str()),
                ])
                .header("x-rapidapi-key", &self.api_key)
                .header("x-rapidapi-host", &self.host)
                .send()
                .await?;

            if !response.status().is_success() {
                warn!(status = %response.status(), "tweet search rejected");
                return Err(ServiceError::Http(format!(
                    "HTTP {} from {}",
                    response.status(),
                    url
                )));
            }

            let body: UpstreamSearch = response
                .json()
                .await
                .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

            Ok(body.into_tweets())
        }
    }
}
