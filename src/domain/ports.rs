use crate::domain::model::{AggregateResult, Fact, ImageUrl};
use crate::utils::error::{ProviderError, Result};
use async_trait::async_trait;
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[async_trait]
pub trait FactGetter: Send + Sync {
    async fn get_fact(&self, ctx: &CancellationToken) -> std::result::Result<Fact, ProviderError>;
}

#[async_trait]
pub trait ImageGetter: Send + Sync {
    async fn get_image(
        &self,
        ctx: &CancellationToken,
    ) -> std::result::Result<ImageUrl, ProviderError>;
}

#[async_trait]
pub trait Servicer: Send + Sync {
    async fn get_image_and_fact(&self, ctx: &CancellationToken) -> Result<AggregateResult>;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> SocketAddr;
    fn fact_base_url(&self) -> &str;
    fn image_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}
