//! Request handling surface
//!
//! Validates requests, calls the upstream services and compiles block sets
//! with the canonical compiler. Transport (HTTP routing, rate limiting) is
//! left to the embedding server.

use chrono::{Local, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::analysis::{Analysis, TweetAnalyzer};
use super::error::ServiceError;
use super::search_url::SearchMode;
use super::translator::BlockTranslator;
use super::tweets::{clamp_limit, Tweet, TweetQuery, TweetSource};
use crate::compiler::compile_with;
use crate::core::BlockRegistry;
use crate::ingest::{self, RawBlock};

/// Body of an AI search request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AiSearchRequest {
    #[serde(default)]
    pub query: Option<serde_json::Value>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub limit: Option<serde_json::Value>,
}

impl AiSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(serde_json::Value::String(query.into())),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<Tweet>,
}

/// Tweets plus their analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchResponse {
    pub original_query: String,
    pub results: SearchResults,
    pub analysis: Analysis,
}

/// Body of a natural-language request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NaturalLanguageRequest {
    #[serde(default)]
    pub query: Option<serde_json::Value>,
}

impl NaturalLanguageRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: Some(serde_json::Value::String(query.into())),
        }
    }
}

/// Blocks derived from free text and the query they compile to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NaturalLanguageResponse {
    pub received: bool,
    pub query: String,
    pub blocks: Vec<RawBlock>,
    pub generated_query: String,
    pub timestamp: String,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Request handler over the three upstream services
pub struct SearchService<S, A, T> {
    tweets: S,
    analyzer: A,
    translator: T,
    registry: &'static BlockRegistry,
    today: fn() -> NaiveDate,
}

impl<S, A, T> SearchService<S, A, T>
where
    S: TweetSource,
    A: TweetAnalyzer,
    T: BlockTranslator,
{
    pub fn new(tweets: S, analyzer: A, translator: T) -> Self {
        Self {
            tweets,
            analyzer,
            translator,
            registry: BlockRegistry::global(),
            today: local_today,
        }
    }

    /// Override the calendar used for relative dates
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Search tweets for a compiled query and attach an analysis.
    ///
    /// Analysis failures degrade to [`Analysis::unavailable`]; fetch
    /// failures are returned.
    pub async fn ai_search(&self, request: AiSearchRequest) -> Result<AiSearchResponse, ServiceError> {
        let query = validate_query(request.query.as_ref())?;
        let section = match request.section.as_deref() {
            None => SearchMode::Latest,
            Some(s) => s
                .parse::<SearchMode>()
                .map_err(|_| ServiceError::InvalidSection(s.to_string()))?,
        };
        let limit = clamp_limit(request.limit.as_ref());

        let tweet_query = TweetQuery {
            query: query.clone(),
            section,
            limit,
        };
        let tweets = self.tweets.search(&tweet_query).await.map_err(|e| {
            warn!(error = %e, "tweet search failed");
            ServiceError::TweetFetch(e.to_string())
        })?;

        let analysis = if tweets.is_empty() {
            Analysis::empty()
        } else {
            self.analyzer
                .analyze(&query, &tweets)
                .await
                .unwrap_or_else(|e| {
                    warn!(error = %e, "analysis unavailable");
                    Analysis::unavailable()
                })
        };

        info!(%section, limit, results = tweets.len(), "ai search complete");
        Ok(AiSearchResponse {
            original_query: query,
            results: SearchResults { results: tweets },
            analysis,
        })
    }

    /// Translate free text into blocks and compile them
    pub async fn natural_language(
        &self,
        request: NaturalLanguageRequest,
    ) -> Result<NaturalLanguageResponse, ServiceError> {
        let query = validate_query(request.query.as_ref())?;

        let raw = self.translator.translate(&query).await.map_err(|e| {
            warn!(error = %e, "natural-language translation failed");
            ServiceError::Translation(e.to_string())
        })?;

        let blocks = ingest::ingest(raw, self.registry, (self.today)());
        let generated_query = compile_with(self.registry, &blocks);

        info!(blocks = blocks.len(), generated = %generated_query, "natural-language query compiled");
        Ok(NaturalLanguageResponse {
            received: true,
            query,
            blocks: blocks.iter().map(RawBlock::from).collect(),
            generated_query,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }
}

/// The query must be a string with non-whitespace content
fn validate_query(query: Option<&serde_json::Value>) -> Result<String, ServiceError> {
    match query {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(ServiceError::InvalidQuery),
    }
}
