// Wires the provider clients, the aggregation service and the HTTP layer together.

use crate::adapters::http::{redact_location, FactService, ImageService};
use crate::core::service::Service;
use crate::core::{ConfigProvider, FactGetter, ImageGetter, Servicer};
use crate::transport::{router, HttpHandler};
use crate::utils::error::Result;
use axum::Router;
use reqwest::Client;
use std::sync::Arc;

/// One client is shared by both providers so they reuse the same connection pool.
pub fn build_http_client<C: ConfigProvider>(config: &C) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}

pub fn build_service<C: ConfigProvider>(config: &C) -> Result<Service> {
    let client = build_http_client(config)?;

    // Provider clients
    let fact: Arc<dyn FactGetter> =
        Arc::new(FactService::new(client.clone(), config.fact_base_url())?);
    let image: Arc<dyn ImageGetter> = Arc::new(ImageService::new(client, config.image_url())?);

    tracing::debug!(
        "Fact provider: {}, image provider: {}",
        redact_location(config.fact_base_url()),
        redact_location(config.image_url())
    );

    Service::new(Some(image), Some(fact))
}

pub fn build_router<C: ConfigProvider>(config: &C) -> Result<Router> {
    let service: Arc<dyn Servicer> = Arc::new(build_service(config)?);

    // Handler owns the service; the router owns the handler
    let handler = HttpHandler::new(Some(service))?;
    Ok(router(handler))
}
