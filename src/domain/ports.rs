use crate::domain::model::RawModelResponse;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Looks up a comparable rental listing near an address and returns the
/// provider's unstructured reply.
#[async_trait]
pub trait ListingSearch: Send + Sync {
    async fn search(&self, address: &str) -> Result<RawModelResponse>;
}
