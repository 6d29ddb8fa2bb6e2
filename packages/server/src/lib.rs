//! # Pagecraft Server
//!
//! Serves the layout persistence API over an in-process repository.
//!
//! ```text
//! GET  /api/admin/cms/layouts?slug=<slug>   latest draft or { item: null }
//! GET  /api/admin/cms/layouts               all layouts, newest first
//! POST /api/admin/cms/layouts               save draft (version = last + 1)
//! POST /api/admin/cms/layouts/publish       promote draft, version-checked
//! ```

mod config;
mod error;

pub use config::{ServerConfig, DEFAULT_CONFIG_NAME};
pub use error::ServerError;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use pagecraft_client::{
    InMemoryLayoutApi, ItemResponse, LayoutApi, LayoutRecord, ListResponse, PublishLayoutRequest,
    SaveLayoutRequest,
};
use pagecraft_editor::{LayoutDocument, LayoutStatus};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone, Default)]
pub struct AppState {
    pub layouts: Arc<InMemoryLayoutApi>,
}

impl AppState {
    pub fn new(layouts: Arc<InMemoryLayoutApi>) -> Self {
        Self { layouts }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/admin/cms/layouts", get(get_layouts).post(save_layout))
        .route("/api/admin/cms/layouts/publish", post(publish_layout))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[derive(Debug, Deserialize)]
struct LayoutQuery {
    slug: Option<String>,
}

async fn get_layouts(
    State(state): State<AppState>,
    Query(query): Query<LayoutQuery>,
) -> Result<Response, ServerError> {
    match query.slug {
        Some(slug) => {
            validate_slug(&slug)?;
            let item = state.layouts.fetch_layout(&slug).await?;
            Ok(Json(ItemResponse {
                item: item.map(|data| LayoutRecord { data }),
            })
            .into_response())
        }
        None => {
            let items = state.layouts.list_layouts().await?;
            Ok(Json(ListResponse {
                items: items.into_iter().map(|data| LayoutRecord { data }).collect(),
            })
            .into_response())
        }
    }
}

async fn save_layout(
    State(state): State<AppState>,
    payload: Result<Json<SaveLayoutRequest>, JsonRejection>,
) -> Result<Json<ItemResponse>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    validate_slug(&request.slug)?;

    // block ids must be unique within the draft
    LayoutDocument::from_parts(
        &request.slug,
        &request.name,
        request.device,
        request.blocks.clone(),
        0,
        LayoutStatus::Draft,
    )?;

    let data = state.layouts.save_draft(&request).await?;
    Ok(Json(ItemResponse {
        item: Some(LayoutRecord { data }),
    }))
}

async fn publish_layout(
    State(state): State<AppState>,
    payload: Result<Json<PublishLayoutRequest>, JsonRejection>,
) -> Result<Json<ItemResponse>, ServerError> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;
    validate_slug(&request.slug)?;

    let data = state.layouts.publish(&request).await?;
    Ok(Json(ItemResponse {
        item: Some(LayoutRecord { data }),
    }))
}

fn validate_slug(slug: &str) -> Result<(), ServerError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ServerError::InvalidRequest(format!("invalid slug: {slug:?}")))
    }
}
