//! External interfaces
//!
//! The compiler itself does no I/O. This module holds everything that talks
//! to the outside world: the outbound search URL, the tweet-fetch,
//! analysis and natural-language services, their configuration, and the
//! request handler that ties them together.

pub mod analysis;
pub mod config;
pub mod error;
pub mod handler;
#[cfg(not(target_arch = "wasm32"))]
mod openai;
pub mod search_url;
pub mod translator;
pub mod tweets;

pub use analysis::{Analysis, TweetAnalyzer};
pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorBody, ServiceError};
pub use handler::{
    AiSearchRequest, AiSearchResponse, NaturalLanguageRequest, NaturalLanguageResponse,
    SearchService,
};
pub use search_url::{search_url, SearchMode};
pub use translator::BlockTranslator;
pub use tweets::{Tweet, TweetQuery, TweetSource};

#[cfg(not(target_arch = "wasm32"))]
pub use analysis::OpenAiAnalyzer;
#[cfg(not(target_arch = "wasm32"))]
pub use translator::OpenAiBlockTranslator;
#[cfg(not(target_arch = "wasm32"))]
pub use tweets::RapidApiTweetSource;

/// Handler wired to the HTTP-backed upstream clients
#[cfg(not(target_arch = "wasm32"))]
pub type HttpSearchService =
    SearchService<RapidApiTweetSource, OpenAiAnalyzer, OpenAiBlockTranslator>;

#[cfg(not(target_arch = "wasm32"))]
impl HttpSearchService {
    /// Build the handler from configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        SearchService::new(
            RapidApiTweetSource::new(config),
            OpenAiAnalyzer::new(config),
            OpenAiBlockTranslator::new(config),
        )
    }
}
