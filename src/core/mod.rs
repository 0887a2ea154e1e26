pub mod estimator;

pub use crate::domain::model::{EstimateRequest, EstimateResult, RawModelResponse};
pub use crate::domain::ports::ListingSearch;
pub use crate::utils::error::Result;
