pub mod fact;
pub mod image;

use crate::utils::error::{ProviderError, TransportFailure};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

pub use fact::FactService;
pub use image::ImageService;

/// Location safe to log or return: query, fragment and credentials removed.
pub(crate) fn redact_location(location: &str) -> String {
    match Url::parse(location) {
        Ok(url) => redact_url(&url),
        Err(_) => location
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn redact_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.set_fragment(None);
    let _ = url.set_password(None);
    let _ = url.set_username("");
    url.to_string()
}

fn transport_error(url: &str, source: TransportFailure) -> ProviderError {
    ProviderError::Transport {
        url: url.to_string(),
        source,
    }
}

/// Issues a single GET and decodes the JSON body into `T`.
///
/// Both the request and the body read race against `ctx`; cancellation wins
/// ties so an already-cancelled token never reaches the network.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: Url,
    ctx: &CancellationToken,
) -> Result<T, ProviderError> {
    let target = redact_url(&url);
    tracing::debug!("Making API request to: {}", target);

    let response = tokio::select! {
        biased;
        _ = ctx.cancelled() => return Err(transport_error(&target, TransportFailure::Cancelled)),
        sent = client.get(url).send() => {
            sent.map_err(|e| transport_error(&target, TransportFailure::Network(e.without_url())))?
        }
    };

    let status = response.status();
    tracing::debug!("API response status from {}: {}", target, status);
    if !status.is_success() {
        return Err(transport_error(&target, TransportFailure::Status(status)));
    }

    let body = tokio::select! {
        biased;
        _ = ctx.cancelled() => return Err(transport_error(&target, TransportFailure::Cancelled)),
        read = response.bytes() => {
            read.map_err(|e| transport_error(&target, TransportFailure::Network(e.without_url())))?
        }
    };

    serde_json::from_slice(&body).map_err(|source| ProviderError::Decode {
        url: target,
        source,
    })
}
