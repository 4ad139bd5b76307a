//! Search Blocks - block model and query compiler for structured search
//!
//! This crate provides the block taxonomy for building social-media search
//! queries out of typed blocks, the compiler that turns a set of active
//! blocks into one operator-syntax query string, ingestion of blocks produced
//! by a natural-language service, and the adapters for the external search
//! and analysis services.

pub mod core;
pub mod categories;
pub mod compiler;
pub mod ingest;
pub mod runtime;
pub mod services;
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

// Re-export commonly used types
pub use core::{ActiveBlock, BlockDefinition, BlockId, BlockRegistry};
pub use categories::BlockCategory;
pub use compiler::{compile, compile_with, QueryCompiler};
pub use runtime::{SharedWorkingSet, WorkingSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
