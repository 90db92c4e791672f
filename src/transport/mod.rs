pub mod handler;
pub mod server;

pub use handler::HttpHandler;
pub use server::{router, serve, shutdown_signal};
