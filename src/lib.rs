pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::app::{router, AppState, Backend};
pub use crate::config::ServiceConfig;
pub use crate::core::estimator::RentEstimator;
pub use crate::domain::model::{EstimateRequest, EstimateResult, RawModelResponse};
pub use crate::domain::ports::ListingSearch;
pub use crate::utils::error::{EstimatorError, Result};
