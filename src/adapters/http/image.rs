use crate::domain::model::ImageUrl;
use crate::domain::ports::ImageGetter;
use crate::utils::error::{CatError, ProviderError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use url::Url;

#[derive(Debug, Deserialize)]
struct ImageRecord {
    url: String,
}

/// Image provider client. The configured URL returns a JSON array of image
/// records; only the first record's `url` is used.
#[derive(Debug, Clone)]
pub struct ImageService {
    client: Client,
    url: String,
}

impl ImageService {
    pub fn new(client: Client, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(CatError::MissingDependency {
                parameter: "image_url",
            });
        }

        Ok(Self { client, url })
    }
}

#[async_trait]
impl ImageGetter for ImageService {
    async fn get_image(
        &self,
        ctx: &CancellationToken,
    ) -> std::result::Result<ImageUrl, ProviderError> {
        let url = Url::parse(&self.url).map_err(|e| ProviderError::RequestConstruction {
            location: super::redact_location(&self.url),
            reason: e.to_string(),
        })?;

        let records: Vec<ImageRecord> = super::get_json(&self.client, url, ctx).await?;

        records
            .into_iter()
            .next()
            .map(|record| ImageUrl::new(record.url))
            .ok_or_else(|| ProviderError::EmptyResult {
                url: super::redact_location(&self.url),
            })
    }
}
