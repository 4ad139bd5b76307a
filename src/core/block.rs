//! Block definitions and active block instances
//!
//! A [`BlockDefinition`] is an immutable registry entry describing one kind
//! of search constraint. An [`ActiveBlock`] is a definition the user has
//! placed in the working query, carrying the value(s) they typed.

use serde::{Deserialize, Serialize};

use super::BlockId;
use crate::categories::BlockCategory;

/// Hint telling editors which input widget a block's value needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Calendar date (`YYYY-MM-DD`)
    Date,
    /// Non-negative integer
    Number,
}

/// Registry entry for one block type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDefinition {
    /// Registry identifier (equal to the type for built-in blocks)
    pub id: String,
    /// Block type, unique across the whole registry
    #[serde(rename = "type")]
    pub block_type: String,
    /// Human-readable label; no effect on compilation
    pub label: String,
    /// Category the block is grouped under
    pub category: BlockCategory,
    /// Whether compilation needs a non-empty value to emit anything
    pub requires_value: bool,
    /// Whether the block takes a second value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_second_value: Option<bool>,
    /// Placeholder for the first value input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Placeholder for the second value input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder2: Option<String>,
    /// Input widget hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

impl BlockDefinition {
    /// Create a definition whose registry id equals its type
    pub fn new(
        block_type: impl Into<String>,
        label: impl Into<String>,
        category: BlockCategory,
        requires_value: bool,
    ) -> Self {
        let block_type = block_type.into();
        Self {
            id: block_type.clone(),
            block_type,
            label: label.into(),
            category,
            requires_value,
            requires_second_value: None,
            placeholder: None,
            placeholder2: None,
            input_type: None,
        }
    }

    /// Minimal definition for a type the registry does not know.
    ///
    /// The type doubles as the label; category and `requires_value` come
    /// from whoever produced the block.
    pub fn synthesized(
        block_type: impl Into<String>,
        category: BlockCategory,
        requires_value: bool,
    ) -> Self {
        let block_type = block_type.into();
        Self::new(block_type.clone(), block_type, category, requires_value)
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_second_value(mut self, placeholder2: impl Into<String>) -> Self {
        self.requires_second_value = Some(true);
        self.placeholder2 = Some(placeholder2.into());
        self
    }

    pub fn with_input_type(mut self, input_type: InputType) -> Self {
        self.input_type = Some(input_type);
        self
    }

    /// Whether the block takes a second value
    pub fn needs_second_value(&self) -> bool {
        self.requires_second_value.unwrap_or(false)
    }
}

/// A block placed in the working query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveBlock {
    /// Instance identifier, distinct from the type
    pub id: BlockId,
    /// Block type
    #[serde(rename = "type")]
    pub block_type: String,
    pub label: String,
    pub category: BlockCategory,
    pub requires_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_second_value: Option<bool>,
    /// Free-text user input
    #[serde(default)]
    pub value: String,
    /// Second user input for two-valued blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
}

impl ActiveBlock {
    /// Instantiate a definition with an empty value and a fresh id
    pub fn new(definition: &BlockDefinition) -> Self {
        Self {
            id: BlockId::new(),
            block_type: definition.block_type.clone(),
            label: definition.label.clone(),
            category: definition.category,
            requires_value: definition.requires_value,
            requires_second_value: definition.requires_second_value,
            value: String::new(),
            value2: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_value2(mut self, value2: impl Into<String>) -> Self {
        self.value2 = Some(value2.into());
        self
    }

    /// Whether the value has any non-whitespace content
    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

/// Errors raised while editing a working set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockError {
    /// Type not present in the registry
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    /// A block of this type is already active
    #[error("Block type already in use: {0}")]
    DuplicateType(String),

    /// No active block with this id
    #[error("Block not found: {0}")]
    NotFound(BlockId),
}
