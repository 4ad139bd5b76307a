//! WASM API: `#[wasm_bindgen]` exports for the interactive block editor.
//!
//! This module is only compiled when targeting `wasm32`. It provides:
//! - `init_editor` / `destroy_editor`: lifecycle
//! - `get_block_types` / `get_categories`: palette discovery
//! - `add_block` / `update_block` / `remove_block`: working-set edits
//! - `replace_blocks`: atomic replacement from natural-language output
//! - `get_blocks` / `compile_query` / `compile_blocks`: preview
//! - `build_search_url`: outbound search link
//!
//! Every query shown by the editor comes from [`crate::compiler`].

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::categories::BlockCategory;
use crate::compiler::compile;
use crate::core::{ActiveBlock, BlockId, BlockRegistry};
use crate::ingest::{parse_block_list, resolve_blocks, RawBlock};
use crate::runtime::WorkingSet;
use crate::services::search_url::{search_url, SearchMode, DEFAULT_SEARCH_BASE};

// ── Global state ────────────────────────────────────────────────────────────

thread_local! {
    static EDITOR: RefCell<Option<WorkingSet>> = RefCell::new(None);
}

fn with_editor<R>(f: impl FnOnce(&mut WorkingSet) -> R) -> Result<R, String> {
    EDITOR.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(set) => Ok(f(set)),
            None => Err("Editor not initialized. Call init_editor() first.".into()),
        }
    })
}

// ── Response types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct OkResponse {
    id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct CategoryInfo {
    category: BlockCategory,
    title: &'static str,
    palette: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EditorState<'a> {
    blocks: &'a [ActiveBlock],
    used_types: Vec<&'a str>,
    query: String,
}

fn json_ok(id: &str) -> String {
    serde_json::to_string(&OkResponse { id: id.into() }).unwrap_or_default()
}

fn json_err(msg: impl Into<String>) -> String {
    serde_json::to_string(&ErrorResponse { error: msg.into() }).unwrap_or_default()
}

fn parse_id(id: &str) -> Result<BlockId, String> {
    id.parse::<BlockId>()
        .map_err(|e| format!("Invalid block id '{}': {}", id, e))
}

fn parse_raw_blocks(json: &str) -> Result<Vec<RawBlock>, String> {
    parse_block_list(json).map_err(|e| format!("Invalid blocks JSON: {}", e))
}

// ── Exported functions ──────────────────────────────────────────────────────

#[wasm_bindgen]
pub fn init_editor() {
    console_error_panic_hook::set_once();

    EDITOR.with(|cell| {
        *cell.borrow_mut() = Some(WorkingSet::new());
    });
}

#[wasm_bindgen]
pub fn destroy_editor() {
    EDITOR.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[wasm_bindgen]
pub fn get_block_types() -> String {
    serde_json::to_string(BlockRegistry::global().list_all()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_categories() -> String {
    let categories: Vec<CategoryInfo> = BlockCategory::ALL
        .iter()
        .map(|c| CategoryInfo {
            category: *c,
            title: c.title(),
            palette: c.palette(),
        })
        .collect();
    serde_json::to_string(&categories).unwrap_or_default()
}

#[wasm_bindgen]
pub fn add_block(type_or_id: &str) -> String {
    match with_editor(|set| set.add(type_or_id)) {
        Ok(Ok(id)) => json_ok(&id.to_string()),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn update_block(id: &str, value: &str, value2: Option<String>) -> String {
    let block_id = match parse_id(id) {
        Ok(b) => b,
        Err(e) => return json_err(e),
    };

    match with_editor(|set| set.set_value(block_id, value, value2)) {
        Ok(Ok(())) => json_ok(id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn remove_block(id: &str) -> String {
    let block_id = match parse_id(id) {
        Ok(b) => b,
        Err(e) => return json_err(e),
    };

    match with_editor(|set| set.remove(block_id)) {
        Ok(Ok(_)) => json_ok(id),
        Ok(Err(e)) => json_err(e.to_string()),
        Err(e) => json_err(e),
    }
}

/// Replace the whole working set with natural-language output.
#[wasm_bindgen]
pub fn replace_blocks(blocks_json: &str) -> String {
    let raw = match parse_raw_blocks(blocks_json) {
        Ok(r) => r,
        Err(e) => return json_err(e),
    };

    match with_editor(|set| {
        set.replace_from_raw(raw);
        editor_state(set)
    }) {
        Ok(state) => state,
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn get_blocks() -> String {
    match with_editor(|set| editor_state(set)) {
        Ok(state) => state,
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn compile_query() -> String {
    with_editor(|set| set.compile()).unwrap_or_default()
}

/// Compile a block list without touching the editor state.
///
/// Blocks only need `type` and `value`; malformed input yields an error
/// object rather than an empty query.
#[wasm_bindgen]
pub fn compile_blocks(blocks_json: &str) -> String {
    match parse_raw_blocks(blocks_json) {
        Ok(raw) => compile(&resolve_blocks(raw, BlockRegistry::global())),
        Err(e) => json_err(e),
    }
}

#[wasm_bindgen]
pub fn build_search_url(query: &str, mode: &str) -> Option<String> {
    let mode = mode.parse::<SearchMode>().unwrap_or_default();
    search_url(DEFAULT_SEARCH_BASE, query, mode)
}

fn editor_state(set: &WorkingSet) -> String {
    serde_json::to_string(&EditorState {
        blocks: set.blocks(),
        used_types: set.used_types(),
        query: set.compile(),
    })
    .unwrap_or_default()
}
