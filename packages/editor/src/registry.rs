//! # Block Registry
//!
//! The only place new blocks come from. A registry enables a subset of the
//! closed [`BlockType`] set (all of it by default) and hands out blocks with
//! a fresh id and an owned copy of the type's default config.

use crate::{Block, BlockId, EditorError, EditorResult};
use pagecraft_schema::{BlockConfig, BlockType};
use serde::Serialize;
use std::collections::BTreeSet;

/// Palette entry describing a block type editors may insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    pub block_type: BlockType,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct BlockRegistry {
    enabled: BTreeSet<BlockType>,
}

impl BlockRegistry {
    /// Registry with every block type enabled
    pub fn new() -> Self {
        Self::with_types(BlockType::ALL)
    }

    /// Registry restricted to `types`
    ///
    /// # Example
    /// ```
    /// use pagecraft_editor::BlockRegistry;
    /// use pagecraft_schema::BlockType;
    ///
    /// let registry = BlockRegistry::with_types([BlockType::Banner, BlockType::Text]);
    /// assert!(registry.is_supported(BlockType::Banner));
    /// assert!(!registry.is_supported(BlockType::Spacer));
    /// ```
    pub fn with_types(types: impl IntoIterator<Item = BlockType>) -> Self {
        Self {
            enabled: types.into_iter().collect(),
        }
    }

    pub fn is_supported(&self, block_type: BlockType) -> bool {
        self.enabled.contains(&block_type)
    }

    /// Membership test for a wire name such as `"headerSearch"`.
    pub fn is_supported_name(&self, name: &str) -> bool {
        name.parse::<BlockType>()
            .map(|t| self.is_supported(t))
            .unwrap_or(false)
    }

    /// Create a block with a fresh id and the type's default config.
    ///
    /// # Returns
    /// * `Ok(Block)` for an enabled type
    /// * `Err(EditorError::UnsupportedBlockType)` otherwise
    pub fn create_block(&self, block_type: BlockType) -> EditorResult<Block> {
        if !self.is_supported(block_type) {
            return Err(EditorError::UnsupportedBlockType(block_type.to_string()));
        }

        let block = Block::new(BlockId::new(), BlockConfig::default_for(block_type));
        tracing::debug!(block_id = %block.id(), %block_type, "created block");
        Ok(block)
    }

    /// Like [`create_block`](Self::create_block), from a wire name.
    pub fn create_block_named(&self, name: &str) -> EditorResult<Block> {
        let block_type: BlockType = name.parse()?;
        self.create_block(block_type)
    }

    /// Enabled block types in palette order.
    pub fn catalog(&self) -> Vec<BlockDescriptor> {
        BlockType::ALL
            .iter()
            .filter(|t| self.is_supported(**t))
            .map(|t| BlockDescriptor {
                block_type: *t,
                label: t.label(),
            })
            .collect()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_block_uses_defaults() {
        let registry = BlockRegistry::new();
        let block = registry.create_block(BlockType::Banner).unwrap();

        assert_eq!(block.block_type(), BlockType::Banner);
        assert_eq!(block.config(), &BlockConfig::default_for(BlockType::Banner));
        assert!(block.responsive().is_empty());
    }

    #[test]
    fn test_blocks_do_not_share_config() {
        let registry = BlockRegistry::new();
        let mut first = registry.create_block(BlockType::Category).unwrap();
        let second = registry.create_block(BlockType::Category).unwrap();

        let updated = first
            .config()
            .with_partial(&json!({ "columns": 2 }))
            .unwrap();
        first.set_config(updated).unwrap();

        assert_ne!(first.config(), second.config());
        assert_eq!(second.config(), &BlockConfig::default_for(BlockType::Category));
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let registry = BlockRegistry::new();
        let result = registry.create_block_named("Component: mystery");
        assert_eq!(
            result.unwrap_err(),
            EditorError::UnsupportedBlockType("Component: mystery".to_string())
        );
    }

    #[test]
    fn test_disabled_type_is_an_error() {
        let registry = BlockRegistry::with_types([BlockType::Text]);
        assert!(registry.create_block(BlockType::Text).is_ok());
        assert!(matches!(
            registry.create_block(BlockType::Button),
            Err(EditorError::UnsupportedBlockType(_))
        ));
        assert!(!registry.is_supported_name("button"));
        assert!(registry.is_supported_name("text"));
        assert!(!registry.is_supported_name("nope"));
    }

    #[test]
    fn test_catalog_order() {
        let registry = BlockRegistry::with_types([BlockType::Spacer, BlockType::Banner]);
        let catalog = registry.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].block_type, BlockType::Banner);
        assert_eq!(catalog[1].block_type, BlockType::Spacer);
    }
}
