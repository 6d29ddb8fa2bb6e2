//! # Layout Store
//!
//! The mutable working copy of a [`LayoutDocument`] for one editing session.
//! Constructed per session and passed by reference; there is no global
//! editor state.
//!
//! ## Operation semantics
//!
//! ### Add
//! - Appends; prior blocks keep their order
//! - Rejects an id already in the layout
//!
//! ### Remove
//! - Removes the first block with the id
//! - Absent id is a no-op
//!
//! ### Move
//! - Removes the block at `from`, reinserts it at `to` in the shortened sequence
//! - No-op for `from == to` or any index outside `[0, len)`, checked
//!   against the length at call time
//!
//! ### UpdateConfig
//! - Partial merge; nested groups keep fields the patch omits
//! - On a non-base device the patch lands in that device's override
//! - Schema violations are rejected before anything changes

use crate::commands::LayoutCommand;
use crate::document::{resolve_effective_config, LayoutStatus};
use crate::{Block, BlockId, EditorError, EditorResult, LayoutDocument};
use pagecraft_schema::{merge, BlockConfig, Device, SchemaError};
use serde_json::Value;
use tracing::{debug, warn};

/// The state last persisted as a draft, used for dirty tracking.
#[derive(Debug, Clone, PartialEq)]
struct SavePoint {
    name: String,
    blocks: Vec<Block>,
}

#[derive(Debug, Clone)]
pub struct LayoutStore {
    document: LayoutDocument,
    saved: SavePoint,
}

impl LayoutStore {
    /// Store over the empty default layout for `slug`.
    pub fn new(slug: impl Into<String>) -> Self {
        Self::open(LayoutDocument::empty(slug))
    }

    /// Store over a document loaded from persistence. The loaded state
    /// counts as saved.
    pub fn open(document: LayoutDocument) -> Self {
        let saved = SavePoint {
            name: document.name.clone(),
            blocks: document.blocks().to_vec(),
        };
        Self { document, saved }
    }

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    pub fn into_document(self) -> LayoutDocument {
        self.document
    }

    pub fn blocks(&self) -> &[Block] {
        self.document.blocks()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.document.block(id)
    }

    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    pub fn device(&self) -> Device {
        self.document.device()
    }

    /// Append a block to the end of the layout.
    pub fn add_block(&mut self, block: Block) -> EditorResult<()> {
        if self.document.block(block.id()).is_some() {
            return Err(EditorError::DuplicateBlockId(block.id().clone()));
        }
        debug!(block_id = %block.id(), block_type = %block.block_type(), "add block");
        self.document.blocks_mut().push(block);
        Ok(())
    }

    /// Remove the first block with `id`, returning it.
    pub fn remove_block(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.document.index_of(id)?;
        debug!(block_id = %id, index, "remove block");
        Some(self.document.blocks_mut().remove(index))
    }

    /// Move the block at `from` to `to`. Returns whether anything moved.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.document.len();
        if from == to || from >= len || to >= len {
            debug!(from, to, len, "ignored move");
            return false;
        }

        let blocks = self.document.blocks_mut();
        let block = blocks.remove(from);
        blocks.insert(to, block);
        debug!(from, to, "moved block");
        true
    }

    /// Merge `partial` into the config of block `id`.
    ///
    /// Returns `Ok(false)` when no block has that id.
    pub fn update_block_config(&mut self, id: &BlockId, partial: &Value) -> EditorResult<bool> {
        let device = self.document.device();
        let base_device = self.document.base_device();
        let Some(index) = self.document.index_of(id) else {
            return Ok(false);
        };

        let Some(patch) = partial.as_object() else {
            return Err(EditorError::Validation(SchemaError::NotAnObject(
                merge::json_kind(partial).to_string(),
            )));
        };

        let block = &mut self.document.blocks_mut()[index];
        let result = if device == base_device {
            block
                .config()
                .with_partial(partial)
                .and_then(|config| block.set_config(config))
        } else {
            block.merge_override(device, patch)
        };

        if let Err(e) = result {
            warn!(block_id = %id, %device, error = %e, "rejected config update");
            return Err(e.into());
        }
        debug!(block_id = %id, %device, "updated block config");
        Ok(true)
    }

    /// Drop the override of block `id` for `device`.
    pub fn reset_device_override(&mut self, id: &BlockId, device: Device) -> bool {
        match self.document.index_of(id) {
            Some(index) => self.document.blocks_mut()[index].clear_override(device),
            None => false,
        }
    }

    /// Switch the edited device. Overrides of every device are kept.
    pub fn set_device(&mut self, device: Device) {
        self.document.set_device(device);
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.document.name = name.into();
    }

    /// Effective config of block `id` on `device`.
    pub fn effective_config(&self, id: &BlockId, device: Device) -> EditorResult<Option<BlockConfig>> {
        match self.document.block(id) {
            Some(block) => Ok(Some(resolve_effective_config(
                block,
                device,
                self.document.base_device(),
            )?)),
            None => Ok(None),
        }
    }

    /// Apply a command value. Returns whether the layout changed.
    pub fn apply(&mut self, command: LayoutCommand) -> EditorResult<bool> {
        match command {
            LayoutCommand::Add { block } => self.add_block(block).map(|_| true),
            LayoutCommand::Remove { id } => Ok(self.remove_block(&id).is_some()),
            LayoutCommand::Move { from, to } => match (from.get(), to.get()) {
                (Some(from), Some(to)) => Ok(self.move_block(from, to)),
                _ => {
                    debug!(?from, ?to, "ignored move with malformed index");
                    Ok(false)
                }
            },
            LayoutCommand::UpdateConfig { id, config } => self.update_block_config(&id, &config),
            LayoutCommand::SetDevice { device } => {
                let changed = self.document.device() != device;
                self.set_device(device);
                Ok(changed)
            }
        }
    }

    /// Whether the layout differs from the last saved draft.
    pub fn is_dirty(&self) -> bool {
        self.document.name != self.saved.name || self.document.blocks() != self.saved.blocks
    }

    /// Record a successful draft save of `name` + `blocks` at `version`.
    ///
    /// Blocks edited after the snapshot was taken stay dirty.
    pub fn mark_saved(&mut self, version: u64, name: String, blocks: Vec<Block>) {
        if !self.document.advance_version(version) {
            warn!(
                slug = %self.document.slug,
                current = self.document.version(),
                version,
                "ignored save acknowledgement for an older version"
            );
            return;
        }
        self.document.set_status(LayoutStatus::Draft);
        self.saved = SavePoint { name, blocks };
    }

    /// Record that `version` is now the published version.
    pub fn mark_published(&mut self, version: u64) {
        if self.document.advance_version(version) {
            self.document.set_status(LayoutStatus::Published);
        }
    }
}
