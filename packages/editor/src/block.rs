//! # Blocks
//!
//! A block is one content unit of a layout: an id, a typed config and
//! optional per-device overrides.
//!
//! Blocks are minted by [`crate::BlockRegistry`] or decoded from storage.
//! Decoding goes through the same schema checks as editing, so a stored
//! block with an unknown type or an invented field is rejected instead of
//! becoming a placeholder.

use pagecraft_schema::{merge, BlockConfig, BlockType, Device, SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Opaque block identifier, unique within one layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    /// Generate a new random block id
    pub fn new() -> Self {
        BlockId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        BlockId(s.to_string())
    }
}

impl From<String> for BlockId {
    fn from(s: String) -> Self {
        BlockId(s)
    }
}

/// Partial config objects keyed by device.
pub type DeviceOverrides = BTreeMap<Device, Map<String, Value>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBlock")]
pub struct Block {
    id: BlockId,

    #[serde(flatten)]
    config: BlockConfig,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    responsive: DeviceOverrides,
}

impl Block {
    pub(crate) fn new(id: BlockId, config: BlockConfig) -> Self {
        Self {
            id,
            config,
            responsive: DeviceOverrides::new(),
        }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn block_type(&self) -> BlockType {
        self.config.block_type()
    }

    /// Base config, as edited on the layout's base device.
    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn responsive(&self) -> &DeviceOverrides {
        &self.responsive
    }

    pub fn override_for(&self, device: Device) -> Option<&Map<String, Value>> {
        self.responsive.get(&device)
    }

    /// Replace the base config. Every stored override must still resolve
    /// against the new base, otherwise nothing changes.
    pub(crate) fn set_config(&mut self, config: BlockConfig) -> SchemaResult<()> {
        check_overrides(&config, &self.responsive)?;
        self.config = config;
        Ok(())
    }

    /// Layer `partial` over the override stored for `device`.
    pub(crate) fn merge_override(&mut self, device: Device, partial: &Map<String, Value>) -> SchemaResult<()> {
        let combined = match self.responsive.get(&device) {
            Some(existing) => merge::combine_partials(existing, partial),
            None => partial.clone(),
        };
        resolve_override(&self.config, &combined)?;
        self.responsive.insert(device, combined);
        Ok(())
    }

    /// Drop the override for `device`. Returns whether one existed.
    pub(crate) fn clear_override(&mut self, device: Device) -> bool {
        self.responsive.remove(&device).is_some()
    }
}

/// Resolve `overrides` on top of `base`, checking the result against the schema.
pub(crate) fn resolve_override(base: &BlockConfig, overrides: &Map<String, Value>) -> SchemaResult<BlockConfig> {
    let merged = merge::deep_merge(&base.to_value()?, &Value::Object(overrides.clone()));
    BlockConfig::from_parts(base.block_type(), merged)
}

fn check_overrides(base: &BlockConfig, responsive: &DeviceOverrides) -> SchemaResult<()> {
    for overrides in responsive.values() {
        resolve_override(base, overrides)?;
    }
    Ok(())
}

/// Storage shape of a block, checked before it becomes a [`Block`].
#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    config: Value,
    #[serde(default)]
    responsive: DeviceOverrides,
}

impl TryFrom<RawBlock> for Block {
    type Error = SchemaError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let block_type: BlockType = raw.block_type.parse()?;
        let config = BlockConfig::from_parts(block_type, raw.config)?;
        check_overrides(&config, &raw.responsive)?;

        Ok(Block {
            id: raw.id,
            config,
            responsive: raw.responsive,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_wire_shape() {
        let block = Block::new(BlockId::from("b1"), BlockConfig::default_for(BlockType::Spacer));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({ "id": "b1", "type": "spacer", "config": { "height": 16 } })
        );

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_responsive_round_trip() {
        let mut block = Block::new(BlockId::from("b1"), BlockConfig::default_for(BlockType::Spacer));
        let partial = json!({ "height": 4 });
        block
            .merge_override(Device::Mobile, partial.as_object().unwrap())
            .unwrap();

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["responsive"], json!({ "mobile": { "height": 4 } }));

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back.override_for(Device::Mobile), block.override_for(Device::Mobile));
    }

    #[test]
    fn test_unknown_type_fails_to_decode() {
        let result = serde_json::from_value::<Block>(json!({
            "id": "b1",
            "type": "countdown",
            "config": {}
        }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Unsupported block type"), "{message}");
    }

    #[test]
    fn test_invented_field_fails_to_decode() {
        let result = serde_json::from_value::<Block>(json!({
            "id": "b1",
            "type": "spacer",
            "config": { "height": 8, "sparkles": true }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut block = Block::new(BlockId::from("b1"), BlockConfig::default_for(BlockType::Spacer));
        let partial = json!({ "height": "tall" });
        let result = block.merge_override(Device::Tablet, partial.as_object().unwrap());
        assert!(result.is_err());
        assert!(block.override_for(Device::Tablet).is_none());
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(BlockId::new(), BlockId::new());
    }
}
