//! Working set of active blocks
//!
//! The working set is the query a user is currently editing. It holds at
//! most one active block per type; that invariant is enforced here rather
//! than left to editors.

pub mod shared;

use tracing::debug;

use crate::compiler::{CompiledQuery, QueryCompiler};
use crate::core::catalog::types;
use crate::core::{ActiveBlock, BlockError, BlockId, BlockRegistry};
use crate::ingest::{self, RawBlock};

pub use shared::SharedWorkingSet;

/// Ordered set of active blocks, unique per type
#[derive(Debug, Clone)]
pub struct WorkingSet {
    registry: &'static BlockRegistry,
    blocks: Vec<ActiveBlock>,
}

impl WorkingSet {
    /// Create an empty working set backed by the global registry
    pub fn new() -> Self {
        Self::with_registry(BlockRegistry::global())
    }

    /// Create an empty working set backed by a custom registry
    pub fn with_registry(registry: &'static BlockRegistry) -> Self {
        Self {
            registry,
            blocks: Vec::new(),
        }
    }

    /// Add a fresh, empty block of a registered type
    pub fn add(&mut self, type_or_id: &str) -> Result<BlockId, BlockError> {
        let definition = self
            .registry
            .find(type_or_id)
            .ok_or_else(|| BlockError::UnknownType(type_or_id.to_string()))?;

        self.insert(ActiveBlock::new(definition))
    }

    /// Insert a prepared block
    pub fn insert(&mut self, block: ActiveBlock) -> Result<BlockId, BlockError> {
        if self.contains_type(&block.block_type) {
            return Err(BlockError::DuplicateType(block.block_type));
        }

        let id = block.id;
        debug!(block_type = %block.block_type, block_id = %id, "block added");
        self.blocks.push(block);
        Ok(id)
    }

    /// Replace a block's values in place.
    ///
    /// The second value is always discarded for `or` blocks.
    pub fn set_value(
        &mut self,
        id: BlockId,
        value: impl Into<String>,
        value2: Option<String>,
    ) -> Result<(), BlockError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BlockError::NotFound(id))?;

        block.value = value.into();
        block.value2 = if block.block_type == types::OR {
            None
        } else {
            value2
        };
        Ok(())
    }

    /// Remove a block by id
    pub fn remove(&mut self, id: BlockId) -> Result<ActiveBlock, BlockError> {
        let pos = self
            .blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or(BlockError::NotFound(id))?;

        let removed = self.blocks.remove(pos);
        debug!(block_type = %removed.block_type, block_id = %id, "block removed");
        Ok(removed)
    }

    /// Swap the whole set for a new one, collapsing duplicate types
    /// (last occurrence wins).
    pub fn replace_all(&mut self, blocks: Vec<ActiveBlock>) {
        self.blocks = dedup_blocks(blocks);
    }

    /// Replace the set with natural-language producer output
    pub fn replace_from_raw(&mut self, raw: Vec<RawBlock>) {
        self.blocks = ingest::ingest_now(raw);
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn get(&self, id: BlockId) -> Option<&ActiveBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains_type(&self, block_type: &str) -> bool {
        self.blocks.iter().any(|b| b.block_type == block_type)
    }

    /// Types currently in use, in insertion order
    pub fn used_types(&self) -> Vec<&str> {
        self.blocks.iter().map(|b| b.block_type.as_str()).collect()
    }

    /// Blocks in insertion order
    pub fn blocks(&self) -> &[ActiveBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Compile the current set
    pub fn compile(&self) -> String {
        QueryCompiler::new(self.registry).compile(&self.blocks)
    }

    pub fn compile_parts(&self) -> CompiledQuery {
        QueryCompiler::new(self.registry).compile_parts(&self.blocks)
    }
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}

fn dedup_blocks(blocks: Vec<ActiveBlock>) -> Vec<ActiveBlock> {
    let mut kept: Vec<ActiveBlock> = Vec::with_capacity(blocks.len());
    for block in blocks.into_iter().rev() {
        if !kept.iter().any(|b| b.block_type == block.block_type) {
            kept.push(block);
        }
    }
    kept.reverse();
    kept
}
