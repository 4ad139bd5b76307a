//! Natural-language block ingestion
//!
//! An external service turns free text into a flat list of
//! `{type, value, category, requiresValue}` tuples with no ordering or
//! uniqueness guarantee. Ingestion makes that list safe to compile:
//!
//! - duplicates are collapsed per type, last occurrence wins
//! - known types take the registry's definition; unknown types keep the
//!   producer's claims
//! - `today` / `yesterday` in date blocks become calendar dates
//!
//! The result is a complete replacement for the working set.

pub mod dates;

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::core::{ActiveBlock, BlockRegistry};

/// One block as reported by the natural-language producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_value: Option<bool>,
}

impl RawBlock {
    pub fn new(block_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            value: value.into(),
            category: None,
            requires_value: None,
        }
    }
}

impl From<&ActiveBlock> for RawBlock {
    fn from(block: &ActiveBlock) -> Self {
        Self {
            block_type: block.block_type.clone(),
            value: block.value.clone(),
            category: Some(block.category.to_string()),
            requires_value: Some(block.requires_value),
        }
    }
}

/// Accept strings, numbers and booleans; `null` becomes empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Payload returned by the natural-language producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalLanguageReply {
    pub blocks: Vec<RawBlock>,
}

impl NaturalLanguageReply {
    /// Parse the producer's JSON payload; a missing `blocks` array is an error
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Parse a block list sent by a client, either `{"blocks": [...]}` or a bare
/// array. Client-side ids, labels and `value2` are ignored.
pub fn parse_block_list(payload: &str) -> Result<Vec<RawBlock>, serde_json::Error> {
    match NaturalLanguageReply::parse(payload) {
        Ok(reply) => Ok(reply.blocks),
        Err(_) => serde_json::from_str(payload),
    }
}

/// Instantiate client blocks as given: no dedup, no date rewriting
pub fn resolve_blocks(raw: Vec<RawBlock>, registry: &BlockRegistry) -> Vec<ActiveBlock> {
    raw.into_iter()
        .map(|rb| {
            let definition =
                registry.resolve(&rb.block_type, rb.category.as_deref(), rb.requires_value);
            ActiveBlock::new(&definition).with_value(rb.value)
        })
        .collect()
}

/// Collapse duplicate types, keeping each type's last occurrence in place
pub fn dedup_last_wins(raw: Vec<RawBlock>) -> Vec<RawBlock> {
    let mut last_index: HashMap<String, usize> = HashMap::new();
    for (i, block) in raw.iter().enumerate() {
        last_index.insert(block.block_type.clone(), i);
    }

    raw.into_iter()
        .enumerate()
        .filter(|(i, block)| last_index.get(&block.block_type) == Some(i))
        .map(|(_, block)| block)
        .collect()
}

/// Turn producer output into active blocks, resolving dates against `today`
pub fn ingest(raw: Vec<RawBlock>, registry: &BlockRegistry, today: NaiveDate) -> Vec<ActiveBlock> {
    let received = raw.len();
    let blocks: Vec<ActiveBlock> = dedup_last_wins(raw)
        .into_iter()
        .map(|rb| {
            let definition =
                registry.resolve(&rb.block_type, rb.category.as_deref(), rb.requires_value);
            let value = dates::normalize(&rb.block_type, &rb.value, today).unwrap_or(rb.value);
            ActiveBlock::new(&definition).with_value(value)
        })
        .collect();

    debug!(received, kept = blocks.len(), "ingested natural-language blocks");
    blocks
}

/// [`ingest`] against the global registry and the process's local date
pub fn ingest_now(raw: Vec<RawBlock>) -> Vec<ActiveBlock> {
    ingest(raw, BlockRegistry::global(), Local::now().date_naive())
}
