pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod transport;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::Settings;
pub use core::service::Service;
pub use core::{AggregateResult, Fact, ImageUrl};
pub use transport::HttpHandler;
pub use utils::error::{CatError, ProviderError, ProviderSide, Result, TransportFailure};
