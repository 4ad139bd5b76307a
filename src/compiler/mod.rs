//! Query compiler
//!
//! Turns a set of active blocks into one query string for the search
//! engine's operator grammar. This is the only rendering implementation in
//! the crate; the WASM editor surface and the request handler both call it.
//!
//! Compilation never fails. A block that cannot produce a fragment (blank
//! value, unknown type) is dropped without leaving a stray separator.
//!
//! Ordering:
//! 1. Stable partition into the keyword class and everything else.
//! 2. Within each partition, blocks are bucketed by their type's registry
//!    position; unknown types go last, in input order.
//! 3. Keyword fragments, then the rest, joined by single spaces.

pub mod render;
pub mod terms;

use serde::Serialize;
use tracing::trace;

use crate::core::catalog::is_keyword_type;
use crate::core::{ActiveBlock, BlockRegistry};

/// Compile blocks against the process-wide built-in registry
///
/// # Example
/// ```
/// use search_blocks::compiler::compile;
/// use search_blocks::core::{ActiveBlock, BlockRegistry};
///
/// let registry = BlockRegistry::global();
/// let blocks = vec![
///     ActiveBlock::new(registry.find("min-faves").unwrap()).with_value("100"),
///     ActiveBlock::new(registry.find("all-words").unwrap()).with_value("climate change"),
/// ];
/// assert_eq!(compile(&blocks), "climate change min_faves:100");
/// ```
pub fn compile(blocks: &[ActiveBlock]) -> String {
    QueryCompiler::new(BlockRegistry::global()).compile(blocks)
}

/// Compile blocks against an explicit registry
pub fn compile_with(registry: &BlockRegistry, blocks: &[ActiveBlock]) -> String {
    QueryCompiler::new(registry).compile(blocks)
}

/// Compiled query split into its two ordering classes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    /// Fragments of keyword-class blocks
    pub keyword_part: String,
    /// Fragments of every other block
    pub other_part: String,
}

impl CompiledQuery {
    pub fn is_empty(&self) -> bool {
        self.keyword_part.is_empty() && self.other_part.is_empty()
    }
}

impl std::fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.keyword_part.is_empty(), self.other_part.is_empty()) {
            (false, false) => write!(f, "{} {}", self.keyword_part, self.other_part),
            (false, true) => f.write_str(&self.keyword_part),
            (true, false) => f.write_str(&self.other_part),
            (true, true) => Ok(()),
        }
    }
}

/// Compiler bound to a registry
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler<'r> {
    registry: &'r BlockRegistry,
}

impl<'r> QueryCompiler<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self { registry }
    }

    /// Compile to the final query string
    pub fn compile(&self, blocks: &[ActiveBlock]) -> String {
        self.compile_parts(blocks).to_string()
    }

    /// Compile, keeping the keyword and other parts apart
    pub fn compile_parts(&self, blocks: &[ActiveBlock]) -> CompiledQuery {
        let (keyword, other): (Vec<&ActiveBlock>, Vec<&ActiveBlock>) = blocks
            .iter()
            .partition(|b| is_keyword_type(&b.block_type));

        CompiledQuery {
            keyword_part: self.render_group(keyword),
            other_part: self.render_group(other),
        }
    }

    fn render_group(&self, group: Vec<&ActiveBlock>) -> String {
        self.in_registry_order(group)
            .into_iter()
            .filter_map(|block| {
                let fragment = render::render(
                    &block.block_type,
                    &block.value,
                    block.value2.as_deref(),
                );
                if fragment.is_none() {
                    trace!(block_type = %block.block_type, block_id = %block.id, "block omitted from query");
                }
                fragment
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Reorder a group by registry position without comparing blocks.
    fn in_registry_order<'b>(&self, group: Vec<&'b ActiveBlock>) -> Vec<&'b ActiveBlock> {
        let mut slots: Vec<Vec<&ActiveBlock>> = vec![Vec::new(); self.registry.count()];
        let mut unknown = Vec::new();

        for block in group {
            match self.registry.position(&block.block_type) {
                Some(i) => slots[i].push(block),
                None => unknown.push(block),
            }
        }

        slots.into_iter().flatten().chain(unknown).collect()
    }
}
