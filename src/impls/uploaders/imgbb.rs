use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::config::ImageHostConfig;
use crate::core::models::UploadedFileCreate;
use crate::core::ports::image_host::ImageHost;
use crate::error::Error;

#[derive(Debug, Deserialize)]
struct HostedImage {
    url: String,
}

#[derive(Debug, Deserialize)]
struct HostResponse {
    data: Option<HostedImage>,
    #[serde(default)]
    success: bool,
}

/// imgbb-style upload API: multipart `image` field, key in the query string.
pub struct ImgbbHost {
    client: Client,
    config: ImageHostConfig,
}

impl ImgbbHost {
    pub fn new(config: ImageHostConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

impl ImageHost for ImgbbHost {
    async fn upload(&self, file: UploadedFileCreate) -> Result<String, Error> {
        if self.config.api_key.is_empty() {
            return Err(Error::ImageHost("image hosting is not configured".into()));
        }
        let filename = file.filename();
        let part = Part::bytes(file.content).file_name(filename.clone());
        let form = Form::new().part("image", part);
        let resp = self
            .client
            .post(&self.config.upload_url)
            .query(&[("key", &self.config.api_key)])
            .multipart(form)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::ImageHost(format!("upload of {} failed with {}", filename, status)));
        }
        match resp.json::<HostResponse>().await? {
            HostResponse { success: true, data: Some(image) } => Ok(image.url),
            _ => Err(Error::ImageHost(format!("upload of {} was not accepted", filename))),
        }
    }
}
