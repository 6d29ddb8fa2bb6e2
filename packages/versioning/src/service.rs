//! Draft save and publish against a [`LayoutApi`].
//!
//! ## Guarantees
//!
//! - A failed save or publish leaves the [`LayoutStore`] untouched
//! - Each successful save advances the draft version by exactly one
//! - Publish promotes the saved draft as-is and only when its version is
//!   still the one this store last saw
//! - One save and one publish per slug at a time; overlapping calls fail
//!   fast instead of queueing
//! - A store only saves and publishes under its own slug

use crate::gate::InFlight;
use crate::{VersioningConfig, VersioningError, VersioningResult};
use pagecraft_client::{ApiError, ApiResult, LayoutApi, LayoutData, PublishLayoutRequest, SaveLayoutRequest};
use pagecraft_editor::LayoutStore;
use pagecraft_schema::Device;
use std::future::Future;
use tracing::{debug, info, warn};

pub struct VersioningService<A> {
    api: A,
    config: VersioningConfig,
    saving: InFlight,
    publishing: InFlight,
}

impl<A: LayoutApi> VersioningService<A> {
    pub fn new(api: A) -> Self {
        Self::with_config(api, VersioningConfig::default())
    }

    pub fn with_config(api: A, config: VersioningConfig) -> Self {
        Self {
            api,
            config,
            saving: InFlight::default(),
            publishing: InFlight::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &VersioningConfig {
        &self.config
    }

    pub fn is_saving(&self, slug: &str) -> bool {
        self.saving.is_busy(slug)
    }

    pub fn is_publishing(&self, slug: &str) -> bool {
        self.publishing.is_busy(slug)
    }

    /// Open an editing session on `slug`.
    ///
    /// A slug that was never saved opens as the empty default layout at
    /// version 0.
    pub async fn load(&self, slug: &str) -> VersioningResult<LayoutStore> {
        let data = self
            .with_retry("load", slug, || self.api.fetch_layout(slug))
            .await?;

        match data {
            Some(data) => {
                debug!(slug, version = data.version, "loaded layout");
                Ok(LayoutStore::open(data.into_document()?))
            }
            None => {
                debug!(slug, "no saved layout, starting empty");
                Ok(LayoutStore::new(slug))
            }
        }
    }

    /// Persist the store's blocks as a new draft. Returns the new version.
    pub async fn save(
        &self,
        store: &mut LayoutStore,
        slug: &str,
        name: &str,
        device: Device,
    ) -> VersioningResult<u64> {
        ensure_slug(store, slug)?;
        let _guard = self
            .saving
            .try_acquire(slug)
            .ok_or_else(|| VersioningError::SaveInProgress(slug.to_string()))?;

        let request = SaveLayoutRequest {
            slug: slug.to_string(),
            name: name.to_string(),
            device,
            blocks: store.blocks().to_vec(),
        };
        let saved = self
            .with_retry("save", slug, || self.api.save_draft(&request))
            .await?;

        store.set_name(request.name.clone());
        store.mark_saved(saved.version, request.name, request.blocks);
        info!(slug, version = saved.version, "saved draft");
        Ok(saved.version)
    }

    /// Promote the latest saved draft of `slug`. Returns the published
    /// version.
    ///
    /// Unsaved edits in `store` are not part of what gets published.
    pub async fn publish(
        &self,
        store: &mut LayoutStore,
        slug: &str,
        name: &str,
        device: Device,
    ) -> VersioningResult<u64> {
        ensure_slug(store, slug)?;
        let _guard = self
            .publishing
            .try_acquire(slug)
            .ok_or_else(|| VersioningError::PublishInProgress(slug.to_string()))?;

        if store.is_dirty() {
            warn!(slug, "publishing with unsaved edits; only the saved draft is published");
        }

        let request = PublishLayoutRequest {
            slug: slug.to_string(),
            name: name.to_string(),
            device,
            expected_version: store.document().version(),
        };
        let published = self
            .with_retry("publish", slug, || self.api.publish(&request))
            .await?;

        let version = published.published_version().unwrap_or(published.version);
        store.mark_published(version);
        info!(slug, version, "published layout");
        Ok(version)
    }

    /// All persisted layouts, most recently updated first.
    pub async fn list_layouts(&self) -> VersioningResult<Vec<LayoutData>> {
        Ok(self
            .with_retry("list", "*", || self.api.list_layouts())
            .await?)
    }

    async fn with_retry<T, F, Fut>(&self, operation: &str, slug: &str, mut call: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let policy = &self.config.retry;
        let max_attempts = policy.max_attempts();
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    let delay = policy.delay(attempt);
                    warn!(operation, slug, attempt, error = %e, ?delay, "retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    warn!(operation, slug, attempt, error = %e, "request failed");
                    return Err(e);
                }
            }
        }
    }
}

fn ensure_slug(store: &LayoutStore, slug: &str) -> VersioningResult<()> {
    let editing = &store.document().slug;
    if editing == slug {
        Ok(())
    } else {
        Err(VersioningError::SlugMismatch {
            store: editing.clone(),
            requested: slug.to_string(),
        })
    }
}
