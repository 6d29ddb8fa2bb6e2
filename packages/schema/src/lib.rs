//! # Pagecraft Schema
//!
//! The closed catalog of block types and the configuration shape of each.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: block types + config shapes         │
//! │  - Shared groups (spacing, shadow, action)  │
//! │  - Per-type configs with defaults           │
//! │  - Partial merge + shape validation         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: registry, layout document, store    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! A block's config is a tagged variant: [`BlockConfig`] carries exactly the
//! struct declared for its [`BlockType`], so there are no fields that only
//! make sense for some other type.
//!
//! Partial updates travel as JSON objects. They are merged over the current
//! config with [`merge::merge_partial`] and decoded back into the typed
//! struct; anything the type does not declare is rejected.

mod action;
mod block_type;
mod config;
mod device;
mod error;
mod groups;
pub mod merge;

pub use action::{ActionTarget, ActionType};
pub use block_type::BlockType;
pub use config::{
    BannerConfig, BlockConfig, ButtonConfig, ButtonVariant, CategoryConfig, CategoryIcon,
    CategoryItem, CategoryLayout, HeaderSearchConfig, IconShape, ProductCarouselConfig,
    SearchInputStyle, SpacerConfig, TextConfig,
};
pub use device::Device;
pub use error::{SchemaError, SchemaResult};
pub use groups::{
    Border, BoxShadow, DataSource, DataSourceKind, FontWeight, SectionHeader, Spacing, TextAlign,
    TextStyle,
};
