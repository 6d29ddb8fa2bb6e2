//! # Layout Commands
//!
//! Edits expressed as values, independent of how they were captured
//! (pointer drag, keyboard reordering, a script). A command is applied with
//! [`crate::LayoutStore::apply`].
//!
//! ```json
//! { "kind": "move", "from": 2, "to": 0 }
//! ```
//!
//! Move indices come straight from UI events and may be stale or
//! malformed. Anything that is not a non-negative integer turns the move
//! into a no-op instead of a decode failure.

use crate::{Block, BlockId};
use pagecraft_schema::Device;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutCommand {
    /// Append a registry-created block
    Add { block: Block },

    /// Remove a block by id (no-op if absent)
    Remove { id: BlockId },

    /// Reorder: take the block at `from`, reinsert it at `to`
    Move { from: DragIndex, to: DragIndex },

    /// Merge a partial config into a block
    UpdateConfig { id: BlockId, config: Value },

    /// Switch the device being edited
    SetDevice { device: Device },
}

impl LayoutCommand {
    pub fn move_block(from: usize, to: usize) -> Self {
        LayoutCommand::Move {
            from: DragIndex::from(from),
            to: DragIndex::from(to),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LayoutCommand::Add { .. } => "add",
            LayoutCommand::Remove { .. } => "remove",
            LayoutCommand::Move { .. } => "move",
            LayoutCommand::UpdateConfig { .. } => "updateConfig",
            LayoutCommand::SetDevice { .. } => "setDevice",
        }
    }
}

/// A sequence index taken from an untrusted event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragIndex(Option<usize>);

impl DragIndex {
    /// `None` when the payload was not a non-negative integer.
    pub fn get(&self) -> Option<usize> {
        self.0
    }
}

impl From<usize> for DragIndex {
    fn from(index: usize) -> Self {
        DragIndex(Some(index))
    }
}

impl Serialize for DragIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(index) => serializer.serialize_u64(index as u64),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DragIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(DragIndex(
            value.as_u64().and_then(|n| usize::try_from(n).ok()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_command_decodes() {
        let command: LayoutCommand =
            serde_json::from_value(json!({ "kind": "move", "from": 2, "to": 0 })).unwrap();
        assert_eq!(command, LayoutCommand::move_block(2, 0));
    }

    #[test]
    fn test_malformed_indices_decode_as_missing() {
        for bad in [json!(1.5), json!(-1), json!("2"), json!(null)] {
            let command: LayoutCommand =
                serde_json::from_value(json!({ "kind": "move", "from": bad, "to": 0 })).unwrap();
            match command {
                LayoutCommand::Move { from, to } => {
                    assert_eq!(from.get(), None);
                    assert_eq!(to.get(), Some(0));
                }
                other => panic!("unexpected command: {other:?}"),
            }
        }
    }

    #[test]
    fn test_update_config_command() {
        let command: LayoutCommand = serde_json::from_value(json!({
            "kind": "updateConfig",
            "id": "b1",
            "config": { "header": { "text": "Hello" } }
        }))
        .unwrap();
        assert_eq!(command.name(), "updateConfig");
    }
}
