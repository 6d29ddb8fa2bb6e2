//! [`LayoutApi`] over the admin HTTP API.

use crate::api::{
    ErrorBody, ErrorDetail, ItemResponse, LayoutApi, LayoutData, ListResponse,
    PublishLayoutRequest, SaveLayoutRequest,
};
use crate::{ApiConfig, ApiError, ApiResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const LAYOUTS_PATH: &str = "/api/admin/cms/layouts";
const PUBLISH_PATH: &str = "/api/admin/cms/layouts/publish";

pub struct HttpLayoutApi {
    config: ApiConfig,
    client: Client,
}

impl HttpLayoutApi {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl LayoutApi for HttpLayoutApi {
    async fn fetch_layout(&self, slug: &str) -> ApiResult<Option<LayoutData>> {
        debug!(slug, "fetching layout");
        let request = self
            .client
            .get(self.config.url(LAYOUTS_PATH))
            .query(&[("slug", slug)]);
        let response = authorize(request, &self.config).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_response(response, slug, None).await?;
        let body: ItemResponse = read_json(response).await?;
        Ok(body.item.map(|record| record.data))
    }

    async fn list_layouts(&self) -> ApiResult<Vec<LayoutData>> {
        let request = self.client.get(self.config.url(LAYOUTS_PATH));
        let response = authorize(request, &self.config).send().await?;
        let response = check_response(response, "", None).await?;
        let body: ListResponse = read_json(response).await?;
        Ok(body.items.into_iter().map(|record| record.data).collect())
    }

    async fn save_draft(&self, request: &SaveLayoutRequest) -> ApiResult<LayoutData> {
        debug!(slug = %request.slug, blocks = request.blocks.len(), "saving draft");
        let builder = self.client.post(self.config.url(LAYOUTS_PATH)).json(request);
        let response = authorize(builder, &self.config).send().await?;
        let response = check_response(response, &request.slug, None).await?;
        expect_item(read_json(response).await?, &request.slug)
    }

    async fn publish(&self, request: &PublishLayoutRequest) -> ApiResult<LayoutData> {
        debug!(slug = %request.slug, expected = request.expected_version, "publishing");
        let builder = self.client.post(self.config.url(PUBLISH_PATH)).json(request);
        let response = authorize(builder, &self.config).send().await?;
        let response =
            check_response(response, &request.slug, Some(request.expected_version)).await?;
        expect_item(read_json(response).await?, &request.slug)
    }
}

pub(crate) fn build_client(config: &ApiConfig) -> ApiResult<Client> {
    if config.base_url.is_empty() {
        return Err(ApiError::Config("base URL is empty".to_string()));
    }
    Ok(Client::builder().timeout(config.timeout()).build()?)
}

pub(crate) fn authorize(request: RequestBuilder, config: &ApiConfig) -> RequestBuilder {
    match &config.auth_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Decode through `serde_json` so malformed bodies surface as
/// [`ApiError::Decode`] rather than a transport error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Map a non-success response onto [`ApiError`].
pub(crate) async fn check_response(
    response: Response,
    slug: &str,
    expected_version: Option<u64>,
) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map(|body| body.error);
    warn!(slug, status = status.as_u16(), body = %text, "request failed");

    let code = detail.as_ref().map(|d| d.code.as_str()).unwrap_or_default();
    let error = if code == ErrorDetail::STALE_VERSION
        || (status == StatusCode::CONFLICT && detail.is_none())
    {
        ApiError::StaleVersion {
            expected: expected_version.unwrap_or_default(),
            current: detail
                .as_ref()
                .and_then(|d| d.current_version)
                .unwrap_or_default(),
        }
    } else if code == ErrorDetail::NOTHING_TO_PUBLISH {
        ApiError::NothingToPublish(slug.to_string())
    } else if status == StatusCode::NOT_FOUND || code == ErrorDetail::NOT_FOUND {
        ApiError::NotFound(slug.to_string())
    } else {
        ApiError::Status {
            status: status.as_u16(),
            message: detail.map(|d| d.message).unwrap_or(text),
        }
    };
    Err(error)
}

fn expect_item(body: ItemResponse, slug: &str) -> ApiResult<LayoutData> {
    body.item
        .map(|record| record.data)
        .ok_or_else(|| ApiError::NotFound(slug.to_string()))
}
