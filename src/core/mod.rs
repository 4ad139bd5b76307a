//! Core block abstractions and types
//!
//! This module defines the block data model (registry definitions and the
//! active instances a user edits), the built-in block catalog, and the
//! registry used to look definitions up.

pub mod block;
pub mod catalog;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

pub use block::{ActiveBlock, BlockDefinition, BlockError, InputType};
pub use registry::{BlockRegistry, RegistryError};

/// Unique identifier for an active block instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(BlockId)
    }
}
