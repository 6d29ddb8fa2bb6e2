//! Persistence contract and wire types.
//!
//! ```text
//! GET  /api/admin/cms/layouts?slug=<slug>   → { item: { data } | null }
//! GET  /api/admin/cms/layouts               → { items: [{ data }] }
//! POST /api/admin/cms/layouts               → { item: { data } }   (save draft)
//! POST /api/admin/cms/layouts/publish       → { item: { data } }
//! ```

use crate::ApiResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagecraft_editor::{Block, EditorResult, LayoutDocument, LayoutStatus};
use pagecraft_schema::Device;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The published copy of a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedSnapshot {
    pub version: u64,
    pub name: String,
    pub device: Device,
    pub blocks: Vec<Block>,
    pub saved_at: DateTime<Utc>,
}

/// One persisted layout: the latest draft plus the published copy, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub slug: String,
    pub name: String,
    pub device: Device,
    pub version: u64,
    pub blocks: Vec<Block>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<PublishedSnapshot>,
}

impl LayoutData {
    /// Whether the published copy is the current draft.
    pub fn is_published(&self) -> bool {
        self.published
            .as_ref()
            .is_some_and(|p| p.version == self.version)
    }

    pub fn published_version(&self) -> Option<u64> {
        self.published.as_ref().map(|p| p.version)
    }

    /// The draft as an editable document.
    pub fn into_document(self) -> EditorResult<LayoutDocument> {
        let status = if self.is_published() {
            LayoutStatus::Published
        } else {
            LayoutStatus::Draft
        };
        LayoutDocument::from_parts(
            self.slug,
            self.name,
            self.device,
            self.blocks,
            self.version,
            status,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub data: LayoutData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: Option<LayoutRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    pub items: Vec<LayoutRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveLayoutRequest {
    pub slug: String,
    pub name: String,
    pub device: Device,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishLayoutRequest {
    pub slug: String,
    pub name: String,
    pub device: Device,
    /// Draft version the caller believes is current.
    pub expected_version: u64,
}

/// Error body returned by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_version: Option<u64>,
}

impl ErrorDetail {
    pub const STALE_VERSION: &'static str = "stale_version";
    pub const NOT_FOUND: &'static str = "not_found";
    pub const NOTHING_TO_PUBLISH: &'static str = "nothing_to_publish";
    pub const INVALID_REQUEST: &'static str = "invalid_request";
}

/// Layout persistence.
///
/// Implementations must make each write atomic: a reader sees either the
/// previous record or the new one, never a mix.
#[async_trait]
pub trait LayoutApi: Send + Sync {
    /// Latest draft for `slug`, `None` when it was never saved.
    async fn fetch_layout(&self, slug: &str) -> ApiResult<Option<LayoutData>>;

    /// All layouts, most recently updated first.
    async fn list_layouts(&self) -> ApiResult<Vec<LayoutData>>;

    /// Store a new draft. The persistence side assigns `last + 1`.
    async fn save_draft(&self, request: &SaveLayoutRequest) -> ApiResult<LayoutData>;

    /// Promote the latest draft verbatim if it is still `expected_version`.
    async fn publish(&self, request: &PublishLayoutRequest) -> ApiResult<LayoutData>;
}

#[async_trait]
impl<T: LayoutApi + ?Sized> LayoutApi for Arc<T> {
    async fn fetch_layout(&self, slug: &str) -> ApiResult<Option<LayoutData>> {
        (**self).fetch_layout(slug).await
    }

    async fn list_layouts(&self) -> ApiResult<Vec<LayoutData>> {
        (**self).list_layouts().await
    }

    async fn save_draft(&self, request: &SaveLayoutRequest) -> ApiResult<LayoutData> {
        (**self).save_draft(request).await
    }

    async fn publish(&self, request: &PublishLayoutRequest) -> ApiResult<LayoutData> {
        (**self).publish(request).await
    }
}
