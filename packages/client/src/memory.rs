//! In-process layout repository.
//!
//! Records are replaced whole under a write lock, so readers only ever see
//! committed layouts.

use crate::api::{LayoutApi, LayoutData, PublishLayoutRequest, PublishedSnapshot, SaveLayoutRequest};
use crate::{ApiError, ApiResult};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
pub struct InMemoryLayoutApi {
    records: RwLock<HashMap<String, LayoutData>>,
}

impl InMemoryLayoutApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `records`, keyed by slug.
    pub fn with_records(records: impl IntoIterator<Item = LayoutData>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().map(|r| (r.slug.clone(), r)).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl LayoutApi for InMemoryLayoutApi {
    async fn fetch_layout(&self, slug: &str) -> ApiResult<Option<LayoutData>> {
        Ok(self.records.read().await.get(slug).cloned())
    }

    async fn list_layouts(&self) -> ApiResult<Vec<LayoutData>> {
        let mut layouts: Vec<LayoutData> = self.records.read().await.values().cloned().collect();
        layouts.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.slug.cmp(&b.slug))
        });
        Ok(layouts)
    }

    async fn save_draft(&self, request: &SaveLayoutRequest) -> ApiResult<LayoutData> {
        let mut records = self.records.write().await;
        let previous = records.get(&request.slug);

        let record = LayoutData {
            slug: request.slug.clone(),
            name: request.name.clone(),
            device: request.device,
            version: previous.map_or(0, |p| p.version) + 1,
            blocks: request.blocks.clone(),
            updated_at: Utc::now(),
            published: previous.and_then(|p| p.published.clone()),
        };
        info!(slug = %record.slug, version = record.version, "stored draft");

        records.insert(record.slug.clone(), record.clone());
        Ok(record)
    }

    async fn publish(&self, request: &PublishLayoutRequest) -> ApiResult<LayoutData> {
        let mut records = self.records.write().await;
        let Some(current) = records.get(&request.slug) else {
            return Err(ApiError::NothingToPublish(request.slug.clone()));
        };
        if current.version != request.expected_version {
            return Err(ApiError::StaleVersion {
                expected: request.expected_version,
                current: current.version,
            });
        }

        let now = Utc::now();
        let mut record = current.clone();
        record.published = Some(PublishedSnapshot {
            version: record.version,
            name: record.name.clone(),
            device: record.device,
            blocks: record.blocks.clone(),
            saved_at: now,
        });
        record.updated_at = now;
        info!(slug = %record.slug, version = record.version, "published draft");

        records.insert(record.slug.clone(), record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_editor::BlockRegistry;
    use pagecraft_schema::{BlockType, Device};

    fn save_request(slug: &str) -> SaveLayoutRequest {
        SaveLayoutRequest {
            slug: slug.to_string(),
            name: format!("Layout - {slug}"),
            device: Device::Mobile,
            blocks: vec![BlockRegistry::new().create_block(BlockType::Banner).unwrap()],
        }
    }

    fn publish_request(slug: &str, expected_version: u64) -> PublishLayoutRequest {
        PublishLayoutRequest {
            slug: slug.to_string(),
            name: format!("Layout - {slug}"),
            device: Device::Mobile,
            expected_version,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_next_version() {
        let api = InMemoryLayoutApi::new();
        assert_eq!(api.save_draft(&save_request("home")).await.unwrap().version, 1);
        assert_eq!(api.save_draft(&save_request("home")).await.unwrap().version, 2);
        assert_eq!(api.save_draft(&save_request("sale")).await.unwrap().version, 1);
        assert_eq!(api.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_slug_fetches_none() {
        let api = InMemoryLayoutApi::new();
        assert!(api.fetch_layout("nowhere").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_publish_copies_draft() {
        let api = InMemoryLayoutApi::new();
        let draft = api.save_draft(&save_request("home")).await.unwrap();
        let published = api.publish(&publish_request("home", 1)).await.unwrap();

        let snapshot = published.published.unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.blocks, draft.blocks);
        assert_eq!(published.version, 1);
    }

    #[tokio::test]
    async fn test_publish_snapshot_matches_draft() {
        let api = InMemoryLayoutApi::new();
        let mut request = save_request("sale");
        request.name = "Spring sale".to_string();
        let draft = api.save_draft(&request).await.unwrap();

        let mut publish = publish_request("sale", 1);
        publish.name = "Something else".to_string();
        publish.device = Device::Desktop;
        let snapshot = api.publish(&publish).await.unwrap().published.unwrap();

        assert_eq!(snapshot.name, "Spring sale");
        assert_eq!(snapshot.device, Device::Mobile);
        assert_eq!(snapshot.blocks, draft.blocks);
    }

    #[tokio::test]
    async fn test_publish_rejects_stale_version() {
        let api = InMemoryLayoutApi::new();
        api.save_draft(&save_request("home")).await.unwrap();
        api.save_draft(&save_request("home")).await.unwrap();

        let result = api.publish(&publish_request("home", 1)).await;
        assert!(matches!(
            result,
            Err(ApiError::StaleVersion { expected: 1, current: 2 })
        ));
        let stored = api.fetch_layout("home").await.unwrap().unwrap();
        assert!(stored.published.is_none());
    }

    #[tokio::test]
    async fn test_publish_without_draft() {
        let api = InMemoryLayoutApi::new();
        let result = api.publish(&publish_request("home", 0)).await;
        assert!(matches!(result, Err(ApiError::NothingToPublish(_))));
    }

    #[tokio::test]
    async fn test_save_keeps_published_copy() {
        let api = InMemoryLayoutApi::new();
        api.save_draft(&save_request("home")).await.unwrap();
        api.publish(&publish_request("home", 1)).await.unwrap();
        let next = api.save_draft(&save_request("home")).await.unwrap();

        assert_eq!(next.version, 2);
        assert_eq!(next.published_version(), Some(1));
        assert!(!next.is_published());
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let api = InMemoryLayoutApi::new();
        api.save_draft(&save_request("a")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        api.save_draft(&save_request("b")).await.unwrap();

        let slugs: Vec<String> = api
            .list_layouts()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.slug)
            .collect();
        assert_eq!(slugs, vec!["b".to_string(), "a".to_string()]);
    }
}
