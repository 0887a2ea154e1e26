use crate::utils::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};

/// Placeholder for any field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub address: String,
}

impl EstimateRequest {
    /// Accepts a decoded request body. Anything other than an object with a
    /// non-empty string `address` is rejected; the address is passed on as given.
    pub fn from_json(body: &serde_json::Value) -> Result<Self> {
        let address = body
            .get("address")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(EstimatorError::missing_address)?;

        Ok(Self {
            address: address.to_string(),
        })
    }
}

/// Free-form reply text from the model provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawModelResponse {
    pub text: String,
}

impl RawModelResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub estimated_price: String,
    pub average_size: String,
    pub price_per_sqm: String,
}

impl Default for EstimateResult {
    fn default() -> Self {
        Self {
            estimated_price: NOT_AVAILABLE.to_string(),
            average_size: NOT_AVAILABLE.to_string(),
            price_per_sqm: NOT_AVAILABLE.to_string(),
        }
    }
}

impl EstimateResult {
    pub fn has_price_per_sqm(&self) -> bool {
        self.price_per_sqm != NOT_AVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_requires_non_empty_string_address() {
        let ok = EstimateRequest::from_json(&json!({"address": " Av. Larco 101, Miraflores "}))
            .unwrap();
        assert_eq!(ok.address, " Av. Larco 101, Miraflores ");

        // 只有空字串算缺少，空白照樣送出
        let blank = EstimateRequest::from_json(&json!({"address": "   "})).unwrap();
        assert_eq!(blank.address, "   ");

        for body in [
            json!({}),
            json!({"address": ""}),
            json!({"address": null}),
            json!({"address": 42}),
            json!(["address"]),
            json!("Av. Larco 101"),
        ] {
            let err = EstimateRequest::from_json(&body).unwrap_err();
            assert_eq!(err.user_friendly_message(), "Address is required");
        }
    }

    #[test]
    fn test_default_result_serializes_every_key_as_sentinel() {
        let value = serde_json::to_value(EstimateResult::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "estimated_price": "N/A",
                "average_size": "N/A",
                "price_per_sqm": "N/A"
            })
        );
    }
}
