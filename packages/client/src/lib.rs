//! # Pagecraft Client
//!
//! Access to layout persistence and the CMS services the editor leans on.
//!
//! - [`LayoutApi`]: the persistence contract (fetch, list, save draft, publish)
//! - [`HttpLayoutApi`]: that contract over the admin HTTP API
//! - [`InMemoryLayoutApi`]: the same contract in-process, used by the server
//!   and by tests
//! - [`CategoryClient`] and [`ImageUploader`]: auxiliary collaborators

mod api;
mod catalog;
mod config;
mod error;
mod http;
mod memory;
mod upload;

pub use api::{
    ErrorBody, ErrorDetail, ItemResponse, LayoutApi, LayoutData, LayoutRecord, ListResponse,
    PublishLayoutRequest, PublishedSnapshot, SaveLayoutRequest,
};
pub use catalog::{normalize_categories, Category, CategoryClient};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use http::HttpLayoutApi;
pub use memory::InMemoryLayoutApi;
pub use upload::{ImageUploader, UploadedImage};
