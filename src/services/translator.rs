//! Natural-language to blocks contract
//!
//! A translator turns free text into raw blocks. Its output is untrusted:
//! the request handler runs it through [`crate::ingest`] before compiling.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::error::ServiceError;
use crate::categories::BlockCategory;
use crate::core::BlockRegistry;
use crate::ingest::RawBlock;

/// Converts a natural-language request into raw blocks
#[async_trait]
pub trait BlockTranslator: Send + Sync {
    async fn translate(&self, query: &str) -> Result<Vec<RawBlock>, ServiceError>;
}

/// Registry catalog grouped by category, as shown to the model
pub fn catalog_json(registry: &BlockRegistry) -> Value {
    let mut grouped = Map::new();
    for category in BlockCategory::ALL {
        let entries: Vec<Value> = registry
            .by_category(category)
            .into_iter()
            .map(|d| {
                json!({
                    "type": d.block_type,
                    "label": d.label,
                    "requiresValue": d.requires_value,
                })
            })
            .collect();
        grouped.insert(category.as_str().to_string(), Value::Array(entries));
    }
    Value::Object(grouped)
}

/// System prompt describing the block grammar to the model
pub fn system_prompt(registry: &BlockRegistry) -> String {
    let catalog =
        serde_json::to_string_pretty(&catalog_json(registry)).unwrap_or_else(|_| "{}".into());

    format!(
        r#"You are a Twitter search query builder. Your task is to convert natural language queries into structured search blocks.

Available blocks and their formats:
{catalog}

Return a JSON object with a "blocks" array, where each block contains:
- type: the block type from the available blocks
- value: the value for the block (if requiresValue is true)
- category: the category the block belongs to

Dates must be YYYY-MM-DD, or the words "today" / "yesterday".

Example input: "Find tweets about climate change with at least 100 likes"
Example output:
{{
  "blocks": [
    {{ "type": "all-words", "value": "climate change", "category": "keyword" }},
    {{ "type": "min-faves", "value": "100", "category": "engagement" }}
  ]
}}"#
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub use http::OpenAiBlockTranslator;

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use async_trait::async_trait;
    use tracing::debug;

    use super::{system_prompt, BlockTranslator};
    use crate::core::BlockRegistry;
    use crate::ingest::{NaturalLanguageReply, RawBlock};
    use crate::services::config::ServiceConfig;
    use crate::services::error::ServiceError;
    use crate::services::openai::{ChatClient, Completion};

    const TRANSLATION_COMPLETION: Completion = Completion {
        temperature: 0.2,
        max_tokens: 500,
    };

    /// Translator backed by a chat-completion model
    pub struct OpenAiBlockTranslator {
        chat: ChatClient,
        system_prompt: String,
    }

    impl OpenAiBlockTranslator {
        pub fn new(config: &ServiceConfig) -> Self {
            Self {
                chat: ChatClient::new(config),
                system_prompt: system_prompt(BlockRegistry::global()),
            }
        }
    }

    #[async_trait]
    impl BlockTranslator for OpenAiBlockTranslator {
        async fn translate(&self, query: &str) -> Result<Vec<RawBlock>, ServiceError> {
            let content = self
                .chat
                .complete_json(&self.system_prompt, query, TRANSLATION_COMPLETION)
                .await?;

            let reply = NaturalLanguageReply::parse(&content)?;
            debug!(blocks = reply.blocks.len(), "natural-language translation");
            Ok(reply.blocks)
        }
    }
}
