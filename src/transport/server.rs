//! Routing and the serve loop.

use crate::transport::HttpHandler;
use crate::utils::error::Result;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

async fn get_image_and_fact(State(handler): State<Arc<HttpHandler>>) -> Response {
    handler.get().await
}

/// `GET /` is the only route.
pub fn router(handler: HttpHandler) -> Router {
    Router::new()
        .route("/", get(get_image_and_fact))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(handler))
}

pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("🚀 Listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
