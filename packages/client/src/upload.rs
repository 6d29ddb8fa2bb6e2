//! Image upload for banner and category artwork.

use crate::http::{authorize, build_client, check_response, read_json};
use crate::{ApiConfig, ApiResult};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

const UPLOAD_PATH: &str = "/api/upload/image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

pub struct ImageUploader {
    config: ApiConfig,
    client: Client,
}

impl ImageUploader {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Upload `bytes` as multipart field `file`; returns the public URL.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String> {
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let request = self.client.post(self.config.url(UPLOAD_PATH)).multipart(form);
        let response = authorize(request, &self.config).send().await?;
        let response = check_response(response, file_name, None).await?;
        let uploaded: UploadedImage = read_json(response).await?;

        info!(file_name, size, url = %uploaded.url, "uploaded image");
        Ok(uploaded.url)
    }
}
