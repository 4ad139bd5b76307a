//! Shared handle to a working set
//!
//! Editors and the natural-language flow may hold the same handle. Every
//! edit takes the write lock once, and a replacement swaps the entire set
//! under a single lock so partial edits never interleave with it.

use parking_lot::RwLock;
use std::sync::Arc;

use super::WorkingSet;
use crate::core::{ActiveBlock, BlockError, BlockId};
use crate::ingest::RawBlock;

/// Thread-safe, cloneable handle to a [`WorkingSet`]
#[derive(Debug, Clone, Default)]
pub struct SharedWorkingSet {
    inner: Arc<RwLock<WorkingSet>>,
}

impl SharedWorkingSet {
    pub fn new(set: WorkingSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    pub fn add(&self, type_or_id: &str) -> Result<BlockId, BlockError> {
        self.inner.write().add(type_or_id)
    }

    pub fn set_value(
        &self,
        id: BlockId,
        value: impl Into<String>,
        value2: Option<String>,
    ) -> Result<(), BlockError> {
        self.inner.write().set_value(id, value, value2)
    }

    pub fn remove(&self, id: BlockId) -> Result<ActiveBlock, BlockError> {
        self.inner.write().remove(id)
    }

    /// Atomically replace every block
    pub fn replace_all(&self, blocks: Vec<ActiveBlock>) {
        self.inner.write().replace_all(blocks);
    }

    /// Atomically replace every block with ingested producer output
    pub fn replace_from_raw(&self, raw: Vec<RawBlock>) {
        self.inner.write().replace_from_raw(raw);
    }

    /// Copy of the current blocks
    pub fn snapshot(&self) -> Vec<ActiveBlock> {
        self.inner.read().blocks().to_vec()
    }

    pub fn compile(&self) -> String {
        self.inner.read().compile()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlockRegistry;
    use std::thread;

    #[test]
    fn test_concurrent_adds_keep_types_unique() {
        let shared = SharedWorkingSet::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.add("from").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_replace_is_whole_set() {
        let shared = SharedWorkingSet::default();
        let id = shared.add("question").unwrap();
        shared.set_value(id, "", None).unwrap();

        let def = BlockRegistry::global().find("min-faves").unwrap();
        shared.replace_all(vec![ActiveBlock::new(def).with_value("5")]);

        assert_eq!(shared.compile(), "min_faves:5");
        assert!(shared.remove(id).is_err());
        assert_eq!(shared.snapshot().len(), 1);
    }

    #[test]
    fn test_replace_from_raw() {
        let shared = SharedWorkingSet::new(WorkingSet::new());
        assert!(shared.is_empty());
        shared.replace_from_raw(vec![
            RawBlock::new("to", "a"),
            RawBlock::new("to", "b"),
        ]);
        assert_eq!(shared.compile(), "(to:b)");
    }
}
