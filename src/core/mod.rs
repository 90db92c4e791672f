pub mod service;

pub use crate::domain::model::{AggregateResult, Fact, ImageUrl};
pub use crate::domain::ports::{ConfigProvider, FactGetter, ImageGetter, Servicer};
pub use crate::utils::error::Result;
