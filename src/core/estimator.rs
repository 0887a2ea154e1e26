use crate::core::{EstimateResult, ListingSearch, Result};
use std::sync::Arc;
use std::time::Instant;

/// Runs one estimate: listing search, then parsing of the reply.
pub struct RentEstimator {
    search: Arc<dyn ListingSearch>,
}

impl RentEstimator {
    pub fn new(search: Arc<dyn ListingSearch>) -> Self {
        Self { search }
    }

    pub async fn estimate(&self, address: &str) -> Result<EstimateResult> {
        let started = Instant::now();
        tracing::debug!("Estimating rent for address: {}", address);

        let raw = self.search.search(address).await?;
        tracing::debug!("Model reply: {:?}", raw.text);

        let result = EstimateResult::from(&raw);
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            derived = result.has_price_per_sqm(),
            "Estimate ready: price={}, size={}, per_sqm={}",
            result.estimated_price,
            result.average_size,
            result.price_per_sqm
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawModelResponse;
    use crate::utils::error::EstimatorError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSearch {
        reply: std::result::Result<String, u16>,
        seen: Mutex<Vec<String>>,
    }

    impl MockSearch {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ListingSearch for MockSearch {
        async fn search(&self, address: &str) -> Result<RawModelResponse> {
            self.seen.lock().unwrap().push(address.to_string());
            match &self.reply {
                Ok(text) => Ok(RawModelResponse::new(text.clone())),
                Err(status) => Err(EstimatorError::UpstreamError {
                    status: *status,
                    body: String::new(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_estimate_parses_search_reply() {
        let search = Arc::new(MockSearch::replying("PRICE: 2400 PEN\nSIZE: 80 m2"));
        let estimator = RentEstimator::new(search.clone());

        let result = estimator.estimate("Calle Las Begonias 415").await.unwrap();

        assert_eq!(result.estimated_price, "2400 PEN");
        assert_eq!(result.average_size, "80 m2");
        assert_eq!(result.price_per_sqm, "30.00");
        assert_eq!(
            *search.seen.lock().unwrap(),
            vec!["Calle Las Begonias 415".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_to_sentinels() {
        let estimator = RentEstimator::new(Arc::new(MockSearch::replying("No listings found.")));
        let result = estimator.estimate("Somewhere").await.unwrap();
        assert_eq!(result, EstimateResult::default());
    }

    #[tokio::test]
    async fn test_search_failure_propagates() {
        let estimator = RentEstimator::new(Arc::new(MockSearch::failing(502)));
        let err = estimator.estimate("Somewhere").await.unwrap_err();
        assert!(matches!(err, EstimatorError::UpstreamError { status: 502, .. }));
    }
}
