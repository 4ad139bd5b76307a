//! Service error taxonomy
//!
//! Validation errors are rejected at the boundary. Tweet-fetch and
//! natural-language failures propagate to the caller; analysis failures never
//! do (see [`crate::services::analysis::Analysis::unavailable`]).

use serde::Serialize;

/// Errors surfaced by the external-service layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Query missing, not a string, or blank
    #[error("Invalid query parameter")]
    InvalidQuery,

    /// Section other than `latest` / `top`
    #[error("Invalid section parameter: {0}")]
    InvalidSection(String),

    /// Tweet search request failed
    #[error("Failed to fetch results from search API: {0}")]
    TweetFetch(String),

    /// Natural-language conversion failed
    #[error("Failed to process natural language query: {0}")]
    Translation(String),

    /// Analysis request failed
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Upstream payload did not have the expected shape
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

/// JSON error body returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
}

impl ErrorBody {
    /// Echo the caller's query back, as search failures do
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.original_query = Some(query.into());
        self
    }
}

impl ServiceError {
    /// Whether the error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::InvalidQuery | ServiceError::InvalidSection(_))
    }

    /// HTTP status a boundary should answer with
    pub fn status_code(&self) -> u16 {
        if self.is_validation() {
            400
        } else {
            500
        }
    }

    /// Generic message safe to show in production
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::InvalidQuery => "Invalid query parameter",
            ServiceError::InvalidSection(_) => "Invalid section parameter",
            ServiceError::TweetFetch(_) => "Failed to fetch results from Twitter API",
            ServiceError::Translation(_) | ServiceError::MalformedResponse(_) => {
                "Failed to process natural language query"
            }
            ServiceError::Analysis(_) => "Analysis service temporarily unavailable",
            ServiceError::Http(_) => "Upstream service unavailable",
        }
    }

    /// Body for the caller; the detailed message is only exposed in
    /// development mode.
    pub fn to_body(&self, dev_mode: bool) -> ErrorBody {
        let error_detail = match self {
            _ if !dev_mode || self.is_validation() => None,
            ServiceError::TweetFetch(detail)
            | ServiceError::Translation(detail)
            | ServiceError::Analysis(detail)
            | ServiceError::MalformedResponse(detail)
            | ServiceError::Http(detail) => Some(detail.clone()),
            _ => None,
        };

        ErrorBody {
            error: self.public_message().to_string(),
            error_detail,
            original_query: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        ServiceError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::MalformedResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_400() {
        assert_eq!(ServiceError::InvalidQuery.status_code(), 400);
        assert_eq!(ServiceError::InvalidSection("new".into()).status_code(), 400);
        assert_eq!(ServiceError::TweetFetch("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_detail_only_in_dev_mode() {
        let err = ServiceError::TweetFetch("connection reset".into());

        let prod = err.to_body(false);
        assert_eq!(prod.error, "Failed to fetch results from Twitter API");
        assert_eq!(prod.error_detail, None);

        let dev = err.to_body(true);
        assert_eq!(dev.error_detail.as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_fetch_failure_body_echoes_query() {
        let body = ServiceError::TweetFetch("boom".into())
            .to_body(true)
            .with_query("from:nasa");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "originalQuery": "from:nasa",
                "error": "Failed to fetch results from Twitter API",
                "errorDetail": "boom"
            })
        );

        let prod = ServiceError::TweetFetch("boom".into())
            .to_body(false)
            .with_query("from:nasa");
        assert_eq!(prod.original_query.as_deref(), Some("from:nasa"));
        assert_eq!(prod.error_detail, None);
    }

    #[test]
    fn test_body_serialization_skips_empty_fields() {
        let body = ServiceError::InvalidQuery.to_body(true);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Invalid query parameter" }));
    }
}
