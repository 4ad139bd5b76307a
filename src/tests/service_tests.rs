//! Request handling against in-memory upstream services
//!
//! The fakes record what they were asked so the tests can check the exact
//! query, section and limit that reached the upstream.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::json;

use crate::ingest::RawBlock;
use crate::services::{
    AiSearchRequest, Analysis, BlockTranslator, NaturalLanguageRequest, SearchMode,
    SearchService, ServiceError, Tweet, TweetAnalyzer, TweetQuery, TweetSource,
};

fn tweet(id: &str, text: &str) -> Tweet {
    Tweet {
        id: id.into(),
        user_name: "Ferris".into(),
        user_screen_name: "ferris".into(),
        text: text.into(),
        created_at: "Thu Mar 21 10:00:00 +0000 2024".into(),
        retweet_count: 1,
        favorite_count: 2,
        reply_count: 3,
        user_profile_image_url: None,
    }
}

#[derive(Default)]
struct FakeTweets {
    tweets: Vec<Tweet>,
    fail: bool,
    seen: Arc<Mutex<Vec<TweetQuery>>>,
}

#[async_trait]
impl TweetSource for FakeTweets {
    async fn search(&self, request: &TweetQuery) -> Result<Vec<Tweet>, ServiceError> {
        self.seen.lock().push(request.clone());
        if self.fail {
            return Err(ServiceError::Http("connection reset".into()));
        }
        Ok(self.tweets.iter().take(request.limit as usize).cloned().collect())
    }
}

#[derive(Default)]
struct FakeAnalyzer {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TweetAnalyzer for FakeAnalyzer {
    async fn analyze(&self, query: &str, tweets: &[Tweet]) -> Result<Analysis, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ServiceError::Analysis("model overloaded".into()));
        }
        Ok(Analysis {
            summary: format!("{} tweets about {}", tweets.len(), query),
            topics: vec!["rust".into()],
            sentiment: "positive".into(),
            insights: Vec::new(),
            related_questions: None,
        })
    }
}

#[derive(Default)]
struct FakeTranslator {
    reply: Vec<RawBlock>,
    fail: bool,
}

#[async_trait]
impl BlockTranslator for FakeTranslator {
    async fn translate(&self, _query: &str) -> Result<Vec<RawBlock>, ServiceError> {
        if self.fail {
            return Err(ServiceError::MalformedResponse("no blocks".into()));
        }
        Ok(self.reply.clone())
    }
}

fn march_21() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 21).unwrap()
}

fn service(
    tweets: FakeTweets,
    analyzer: FakeAnalyzer,
    translator: FakeTranslator,
) -> SearchService<FakeTweets, FakeAnalyzer, FakeTranslator> {
    SearchService::new(tweets, analyzer, translator).with_clock(march_21)
}

// ====================================================================
// AI search
// ====================================================================

#[tokio::test]
async fn test_search_returns_tweets_and_analysis() {
    let tweets = FakeTweets {
        tweets: vec![tweet("1", "rust 2024"), tweet("2", "async traits")],
        ..Default::default()
    };
    let seen = tweets.seen.clone();
    let svc = service(tweets, FakeAnalyzer::default(), FakeTranslator::default());

    let response = svc.ai_search(AiSearchRequest::new("#rust")).await.unwrap();

    assert_eq!(response.original_query, "#rust");
    assert_eq!(response.results.results.len(), 2);
    assert_eq!(response.analysis.summary, "2 tweets about #rust");

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].section, SearchMode::Latest);
    assert_eq!(seen[0].limit, 5);
}

#[tokio::test]
async fn test_search_passes_section_and_clamped_limit() {
    let tweets = FakeTweets::default();
    let seen = tweets.seen.clone();
    let svc = service(
        tweets,
        FakeAnalyzer::default(),
        FakeTranslator::default(),
    );

    let request = AiSearchRequest {
        section: Some("top".into()),
        limit: Some(json!(50)),
        ..AiSearchRequest::new("rust")
    };
    svc.ai_search(request).await.unwrap();

    let seen = seen.lock();
    assert_eq!(seen[0].section, SearchMode::Top);
    assert_eq!(seen[0].limit, 20);
}

#[tokio::test]
async fn test_empty_results_skip_the_analyzer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let analyzer = FakeAnalyzer {
        calls: calls.clone(),
        ..Default::default()
    };
    let svc = service(FakeTweets::default(), analyzer, FakeTranslator::default());

    let response = svc.ai_search(AiSearchRequest::new("nothing here")).await.unwrap();

    assert!(response.results.results.is_empty());
    assert_eq!(response.analysis, Analysis::empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_analysis_failure_degrades() {
    let tweets = FakeTweets {
        tweets: vec![tweet("1", "hello")],
        ..Default::default()
    };
    let analyzer = FakeAnalyzer {
        fail: true,
        ..Default::default()
    };
    let svc = service(tweets, analyzer, FakeTranslator::default());

    let response = svc.ai_search(AiSearchRequest::new("hello")).await.unwrap();

    assert_eq!(response.results.results.len(), 1);
    assert_eq!(response.analysis, Analysis::unavailable());
}

#[tokio::test]
async fn test_fetch_failure_propagates() {
    let tweets = FakeTweets {
        fail: true,
        ..Default::default()
    };
    let svc = service(tweets, FakeAnalyzer::default(), FakeTranslator::default());

    let err = svc.ai_search(AiSearchRequest::new("rust")).await.unwrap_err();

    assert!(matches!(err, ServiceError::TweetFetch(_)));
    assert_eq!(err.status_code(), 500);
    let body = err.to_body(false).with_query("rust");
    assert_eq!(body.error_detail, None);
    assert_eq!(body.original_query.as_deref(), Some("rust"));
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_before_upstream() {
    let tweets = FakeTweets::default();
    let seen = tweets.seen.clone();
    let svc = service(
        tweets,
        FakeAnalyzer::default(),
        FakeTranslator::default(),
    );

    let blank = svc.ai_search(AiSearchRequest::new("   ")).await.unwrap_err();
    assert_eq!(blank, ServiceError::InvalidQuery);
    assert_eq!(blank.status_code(), 400);

    let not_a_string = AiSearchRequest {
        query: Some(json!(42)),
        ..Default::default()
    };
    assert_eq!(
        svc.ai_search(not_a_string).await.unwrap_err(),
        ServiceError::InvalidQuery
    );

    let bad_section = AiSearchRequest {
        section: Some("oldest".into()),
        ..AiSearchRequest::new("rust")
    };
    assert_eq!(
        svc.ai_search(bad_section).await.unwrap_err(),
        ServiceError::InvalidSection("oldest".into())
    );

    assert!(seen.lock().is_empty());
}

// ====================================================================
// Natural-language conversion
// ====================================================================

#[tokio::test]
async fn test_natural_language_compiles_ingested_blocks() {
    let translator = FakeTranslator {
        reply: vec![
            RawBlock::new("since", "yesterday"),
            RawBlock::new("from", "a"),
            RawBlock::new("all-words", "solar eclipse"),
            RawBlock::new("from", "b"),
        ],
        ..Default::default()
    };
    let svc = service(FakeTweets::default(), FakeAnalyzer::default(), translator);

    let response = svc
        .natural_language(NaturalLanguageRequest::new("eclipse posts from b since yesterday"))
        .await
        .unwrap();

    assert!(response.received);
    assert_eq!(response.query, "eclipse posts from b since yesterday");
    assert_eq!(response.generated_query, "solar eclipse (from:b) since:2024-03-20");

    let types: Vec<_> = response.blocks.iter().map(|b| b.block_type.as_str()).collect();
    assert_eq!(types, vec!["since", "all-words", "from"]);
    assert_eq!(response.blocks[0].value, "2024-03-20");
}

#[tokio::test]
async fn test_natural_language_response_shape() {
    let translator = FakeTranslator {
        reply: vec![RawBlock::new("hashtags", "rust")],
        ..Default::default()
    };
    let svc = service(FakeTweets::default(), FakeAnalyzer::default(), translator);

    let response = svc
        .natural_language(NaturalLanguageRequest::new("rust hashtag"))
        .await
        .unwrap();
    let body = serde_json::to_value(&response).unwrap();

    assert_eq!(body["generatedQuery"], "#rust");
    assert_eq!(body["blocks"][0]["type"], "hashtags");
    assert_eq!(body["blocks"][0]["category"], "keyword");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_translation_failure_propagates() {
    let translator = FakeTranslator {
        fail: true,
        ..Default::default()
    };
    let svc = service(FakeTweets::default(), FakeAnalyzer::default(), translator);

    let err = svc
        .natural_language(NaturalLanguageRequest::new("anything"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Translation(_)));
    let body = err.to_body(true);
    assert!(body.error_detail.is_some());
}

#[tokio::test]
async fn test_natural_language_requires_text() {
    let svc = service(
        FakeTweets::default(),
        FakeAnalyzer::default(),
        FakeTranslator::default(),
    );

    let err = svc
        .natural_language(NaturalLanguageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err, ServiceError::InvalidQuery);
}
