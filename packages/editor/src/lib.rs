//! # Pagecraft Editor
//!
//! In-memory editing engine for Pagecraft layouts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: block types, configs, merge rules   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: registry + layout store             │
//! │  - Create blocks from the registry          │
//! │  - Add / remove / move / update config      │
//! │  - Per-device overrides                     │
//! │  - Dirty tracking against the last save     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ versioning: draft save + publish via API    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Schema first**: every stored config decodes to its typed shape
//! 2. **Closed block set**: unknown types are errors, never placeholders
//! 3. **Explicit state**: one [`LayoutStore`] per editing session, no globals
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{BlockRegistry, LayoutStore};
//! use pagecraft_schema::{BlockType, Device};
//! use serde_json::json;
//!
//! let registry = BlockRegistry::new();
//! let mut store = LayoutStore::new("home");
//!
//! let banner = registry.create_block(BlockType::Banner)?;
//! let id = banner.id().clone();
//! store.add_block(banner)?;
//!
//! store.set_device(Device::Mobile);
//! store.update_block_config(&id, &json!({ "height": 120 }))?;
//! assert!(store.is_dirty());
//! # Ok::<(), pagecraft_editor::EditorError>(())
//! ```

mod block;
mod commands;
mod document;
mod errors;
mod registry;
mod store;

pub use block::{Block, BlockId, DeviceOverrides};
pub use commands::{DragIndex, LayoutCommand};
pub use document::{default_name, resolve_effective_config, LayoutDocument, LayoutStatus};
pub use errors::{EditorError, EditorResult};
pub use registry::{BlockDescriptor, BlockRegistry};
pub use store::LayoutStore;
