use crate::core::Servicer;
use crate::utils::error::{CatError, Result};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Serves the aggregate result over HTTP.
///
/// Failures are logged here and surface to the caller only as a bare 500.
pub struct HttpHandler {
    servicer: Arc<dyn Servicer>,
}

impl HttpHandler {
    pub fn new(servicer: Option<Arc<dyn Servicer>>) -> Result<Self> {
        let servicer = servicer.ok_or(CatError::MissingDependency {
            parameter: "servicer",
        })?;
        Ok(Self { servicer })
    }

    pub async fn get(&self) -> Response {
        // Cancelled when this future is dropped, e.g. the client went away.
        let ctx = CancellationToken::new();
        let _guard = ctx.clone().drop_guard();

        let result = match self.servicer.get_image_and_fact(&ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!("❌ get image and fact failed: {}", e);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        match serde_json::to_vec(&result) {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("❌ failed to encode aggregate result: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
