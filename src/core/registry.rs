//! Block Registry - the authoritative catalog of block definitions
//!
//! The registry is built once and never mutated. It supports:
//! - Ordered listing (editor palette and compiler ordering)
//! - Lookup by type or registry id
//! - Category filtering and label search
//! - Fallback resolution for types it does not know

use std::collections::HashMap;
use std::sync::OnceLock;

use super::block::BlockDefinition;
use super::catalog;
use crate::categories::BlockCategory;

static GLOBAL: OnceLock<BlockRegistry> = OnceLock::new();

/// Immutable, ordered catalog of block definitions
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    definitions: Vec<BlockDefinition>,
    by_type: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl BlockRegistry {
    /// Registry holding the built-in catalog
    ///
    /// # Example
    /// ```
    /// use search_blocks::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::builtin();
    /// assert!(registry.find("min-faves").is_some());
    /// ```
    pub fn builtin() -> Self {
        Self::indexed(catalog::builtin_definitions())
    }

    /// Process-wide built-in registry, built on first use
    pub fn global() -> &'static BlockRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Build a registry from custom definitions
    ///
    /// # Returns
    /// * `Ok(BlockRegistry)` if every definition is valid and types and ids are unique
    /// * `Err(RegistryError)` otherwise
    pub fn from_definitions(definitions: Vec<BlockDefinition>) -> Result<Self, RegistryError> {
        let mut types = HashMap::new();
        let mut ids = HashMap::new();

        for def in &definitions {
            Self::validate_definition(def)?;
            if types.insert(def.block_type.as_str(), ()).is_some() {
                return Err(RegistryError::DuplicateType(def.block_type.clone()));
            }
            if ids.insert(def.id.as_str(), ()).is_some() {
                return Err(RegistryError::DuplicateId(def.id.clone()));
            }
        }

        Ok(Self::indexed(definitions))
    }

    fn indexed(definitions: Vec<BlockDefinition>) -> Self {
        let by_type = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.block_type.clone(), i))
            .collect();
        let by_id = definitions
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.clone(), i))
            .collect();

        Self {
            definitions,
            by_type,
            by_id,
        }
    }

    fn validate_definition(def: &BlockDefinition) -> Result<(), RegistryError> {
        if def.block_type.trim().is_empty() {
            return Err(RegistryError::ValidationError(
                "Block type cannot be empty".into(),
            ));
        }

        if def.id.trim().is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Block id cannot be empty (type '{}')",
                def.block_type
            )));
        }

        if def.label.trim().is_empty() {
            return Err(RegistryError::ValidationError(format!(
                "Block label cannot be empty (type '{}')",
                def.block_type
            )));
        }

        Ok(())
    }

    /// Every definition in declaration order
    pub fn list_all(&self) -> &[BlockDefinition] {
        &self.definitions
    }

    /// Look a definition up by type, falling back to registry id.
    ///
    /// Not finding a definition is an expected outcome, not an error.
    pub fn find(&self, type_or_id: &str) -> Option<&BlockDefinition> {
        self.by_type
            .get(type_or_id)
            .or_else(|| self.by_id.get(type_or_id))
            .map(|&i| &self.definitions[i])
    }

    /// Canonical position of a type in the registry
    pub fn position(&self, block_type: &str) -> Option<usize> {
        self.by_type.get(block_type).copied()
    }

    /// Check whether a type is registered
    pub fn contains(&self, block_type: &str) -> bool {
        self.by_type.contains_key(block_type)
    }

    /// Definitions of one category, in registry order
    pub fn by_category(&self, category: BlockCategory) -> Vec<&BlockDefinition> {
        self.definitions
            .iter()
            .filter(|d| d.category == category)
            .collect()
    }

    /// Search definitions by type or label (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&BlockDefinition> {
        let query = query.trim().to_lowercase();

        self.definitions
            .iter()
            .filter(|d| {
                d.block_type.contains(&query) || d.label.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Display label for a type, or the type itself when unknown
    pub fn label_for<'a>(&'a self, block_type: &'a str) -> &'a str {
        self.find(block_type)
            .map(|d| d.label.as_str())
            .unwrap_or(block_type)
    }

    /// Resolve a type reported by an external producer.
    ///
    /// Known types always use the registry's own definition. Unknown types
    /// get a synthesized one built from the producer's claims; an
    /// unrecognized category claim falls back to `keyword`, a missing
    /// `requires_value` claim to `true`.
    pub fn resolve(
        &self,
        block_type: &str,
        claimed_category: Option<&str>,
        claimed_requires_value: Option<bool>,
    ) -> BlockDefinition {
        if let Some(def) = self.find(block_type) {
            return def.clone();
        }

        let category = claimed_category
            .and_then(|c| c.parse().ok())
            .unwrap_or(BlockCategory::Keyword);

        BlockDefinition::synthesized(
            block_type,
            category,
            claimed_requires_value.unwrap_or(true),
        )
    }

    /// Get the number of registered definitions
    pub fn count(&self) -> usize {
        self.definitions.len()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Registry error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two definitions share a type
    #[error("Duplicate block type: {0}")]
    DuplicateType(String),

    /// Two definitions share a registry id
    #[error("Duplicate block id: {0}")]
    DuplicateId(String),

    /// Definition validation failed
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::types;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let registry = BlockRegistry::from_definitions(catalog::builtin_definitions());
        assert!(registry.is_ok(), "built-in catalog must satisfy registry invariants");
        assert_eq!(registry.unwrap().count(), 21);
    }

    #[test]
    fn test_list_all_preserves_declaration_order() {
        let registry = BlockRegistry::builtin();
        let order: Vec<&str> = registry
            .list_all()
            .iter()
            .map(|d| d.block_type.as_str())
            .collect();

        assert_eq!(&order[..5], &catalog::KEYWORD_TYPES);
        assert_eq!(order[5], types::FROM);
        assert_eq!(order[20], types::QUESTION);
    }

    #[test]
    fn test_find_by_type_and_id() {
        let registry = BlockRegistry::builtin();
        let def = registry.find(types::MIN_FAVES).unwrap();
        assert_eq!(def.label, "Min Likes");
        assert!(def.requires_value);

        assert!(registry.find("lang").is_none());
    }

    #[test]
    fn test_find_falls_back_to_id() {
        let mut def = BlockDefinition::new("geo", "Near", BlockCategory::User, true);
        def.id = "near-location".into();
        let registry = BlockRegistry::from_definitions(vec![def]).unwrap();

        assert_eq!(registry.find("near-location").unwrap().block_type, "geo");
        assert_eq!(registry.find("geo").unwrap().id, "near-location");
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let result = BlockRegistry::from_definitions(vec![
            BlockDefinition::new("from", "From", BlockCategory::User, true),
            BlockDefinition::new("from", "Also from", BlockCategory::Keyword, true),
        ]);
        assert_eq!(result.unwrap_err(), RegistryError::DuplicateType("from".into()));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut second = BlockDefinition::new("to", "To", BlockCategory::User, true);
        second.id = "from".into();
        let result = BlockRegistry::from_definitions(vec![
            BlockDefinition::new("from", "From", BlockCategory::User, true),
            second,
        ]);
        assert!(matches!(result, Err(RegistryError::DuplicateId(_))));
    }

    #[test]
    fn test_validation_empty_label() {
        let result = BlockRegistry::from_definitions(vec![BlockDefinition::new(
            "from",
            " ",
            BlockCategory::User,
            true,
        )]);
        assert!(matches!(result, Err(RegistryError::ValidationError(_))));
    }

    #[test]
    fn test_by_category() {
        let registry = BlockRegistry::builtin();
        let media: Vec<&str> = registry
            .by_category(BlockCategory::Media)
            .iter()
            .map(|d| d.block_type.as_str())
            .collect();
        assert_eq!(
            media,
            vec!["filter-media", "filter-images", "filter-video", "filter-links", "url"]
        );
        assert_eq!(registry.by_category(BlockCategory::Date).len(), 2);
    }

    #[test]
    fn test_search() {
        let registry = BlockRegistry::builtin();
        assert_eq!(registry.search("accounts").len(), 3);
        assert_eq!(registry.search("MIN").len(), 3);
        assert!(registry.search("nothing-like-this").is_empty());
    }

    #[test]
    fn test_label_for_unknown_type() {
        let registry = BlockRegistry::builtin();
        assert_eq!(registry.label_for("hashtags"), "These Hashtags");
        assert_eq!(registry.label_for("lang"), "lang");
    }

    #[test]
    fn test_resolve_prefers_registry_definition() {
        let registry = BlockRegistry::builtin();
        let def = registry.resolve("no-retweets", Some("keyword"), Some(true));
        assert_eq!(def.category, BlockCategory::Engagement);
        assert!(!def.requires_value);
    }

    #[test]
    fn test_resolve_synthesizes_unknown() {
        let registry = BlockRegistry::builtin();
        let def = registry.resolve("lang", Some("media"), Some(false));
        assert_eq!(def.label, "lang");
        assert_eq!(def.category, BlockCategory::Media);
        assert!(!def.requires_value);

        let def = registry.resolve("lang", Some("sentiment"), None);
        assert_eq!(def.category, BlockCategory::Keyword);
        assert!(def.requires_value);
    }

    #[test]
    fn test_global_is_shared() {
        let a = BlockRegistry::global() as *const _;
        let b = BlockRegistry::global() as *const _;
        assert_eq!(a, b);
    }

    #[test]
    fn test_concurrent_lookups() {
        use std::thread;

        let handles: Vec<_> = (0..8)
            .map(|_| {
                thread::spawn(|| {
                    let registry = BlockRegistry::global();
                    registry.position(types::QUESTION)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(20));
        }
    }
}
