//! # Layout Document
//!
//! The ordered block sequence of one page plus its metadata.
//!
//! Invariants held by every constructor and by deserialization:
//! - block ids are unique
//! - `version` never decreases
//!
//! ## Lifecycle
//!
//! ```text
//! empty(slug) → LayoutStore edits → save (Draft v+1) → publish (Published v+1)
//! ```

use crate::block::resolve_override;
use crate::{Block, BlockId, EditorError, EditorResult};
use pagecraft_schema::{BlockConfig, Device, SchemaResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStatus {
    #[default]
    Draft,
    Published,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawDocument")]
pub struct LayoutDocument {
    pub slug: String,
    pub name: String,
    device: Device,
    base_device: Device,
    blocks: Vec<Block>,
    version: u64,
    status: LayoutStatus,
}

impl LayoutDocument {
    /// The fixed empty layout a never-saved slug starts from.
    pub fn empty(slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            name: default_name(&slug),
            slug,
            device: Device::default(),
            base_device: Device::default(),
            blocks: Vec::new(),
            version: 0,
            status: LayoutStatus::Draft,
        }
    }

    /// Assemble a document from stored parts.
    pub fn from_parts(
        slug: impl Into<String>,
        name: impl Into<String>,
        device: Device,
        blocks: Vec<Block>,
        version: u64,
        status: LayoutStatus,
    ) -> EditorResult<Self> {
        ensure_unique_ids(&blocks)?;
        Ok(Self {
            slug: slug.into(),
            name: name.into(),
            device,
            base_device: Device::default(),
            blocks,
            version,
            status,
        })
    }

    pub fn with_base_device(mut self, base_device: Device) -> Self {
        self.base_device = base_device;
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn index_of(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Device currently being edited.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Device whose edits write to the base config.
    pub fn base_device(&self) -> Device {
        self.base_device
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn status(&self) -> LayoutStatus {
        self.status
    }

    /// Effective config of block `id` on `device`.
    pub fn resolve(&self, id: &BlockId, device: Device) -> Option<SchemaResult<BlockConfig>> {
        self.block(id)
            .map(|block| resolve_effective_config(block, device, self.base_device))
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub(crate) fn set_device(&mut self, device: Device) {
        self.device = device;
    }

    pub(crate) fn set_status(&mut self, status: LayoutStatus) {
        self.status = status;
    }

    /// Move the version forward. Lower values are refused.
    pub(crate) fn advance_version(&mut self, version: u64) -> bool {
        if version < self.version {
            return false;
        }
        self.version = version;
        true
    }
}

/// Default display name for a slug, e.g. `Layout - home`.
pub fn default_name(slug: &str) -> String {
    format!("Layout - {slug}")
}

/// Effective config of `block` on `device`.
///
/// On the base device this is the block's config unchanged. Elsewhere the
/// device override (if any) is merged over the base; override fields win
/// and anything the override leaves out falls through.
pub fn resolve_effective_config(
    block: &Block,
    device: Device,
    base_device: Device,
) -> SchemaResult<BlockConfig> {
    if device == base_device {
        return Ok(block.config().clone());
    }
    match block.override_for(device) {
        Some(overrides) => resolve_override(block.config(), overrides),
        None => Ok(block.config().clone()),
    }
}

fn ensure_unique_ids(blocks: &[Block]) -> EditorResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id()) {
            return Err(EditorError::DuplicateBlockId(block.id().clone()));
        }
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDocument {
    slug: String,
    name: String,
    #[serde(default)]
    device: Device,
    #[serde(default)]
    base_device: Device,
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    version: u64,
    #[serde(default)]
    status: LayoutStatus,
}

impl TryFrom<RawDocument> for LayoutDocument {
    type Error = EditorError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        Ok(LayoutDocument::from_parts(
            raw.slug,
            raw.name,
            raw.device,
            raw.blocks,
            raw.version,
            raw.status,
        )?
        .with_base_device(raw.base_device))
    }
}
