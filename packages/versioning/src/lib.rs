//! # Pagecraft Versioning
//!
//! Moves a [`LayoutStore`](pagecraft_editor::LayoutStore) through its
//! persistence lifecycle:
//!
//! ```text
//! Draft(0) ──save──▶ Draft(v+1) ──publish──▶ Published(v+1)
//!                       ▲                         │
//!                       └──────────save───────────┘
//! ```
//!
//! The service talks to any [`LayoutApi`](pagecraft_client::LayoutApi)
//! implementation and never touches the store until a round trip succeeds.

mod config;
mod error;
mod gate;
mod service;

pub use config::{RetryPolicy, VersioningConfig};
pub use error::{VersioningError, VersioningResult};
pub use service::VersioningService;
