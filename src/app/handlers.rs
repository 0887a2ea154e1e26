use crate::app::AppState;
use crate::domain::model::{EstimateRequest, EstimateResult};
use crate::utils::error::{EstimatorError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

/// `POST /api/rent`
///
/// The address is validated before the credential is checked, so a bad request
/// is a 400 even on an unconfigured server. No outbound call happens unless both pass.
pub async fn estimate_rent(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<EstimateResult>> {
    let body = match body {
        Ok(Json(value)) => value,
        Err(rejection) => {
            tracing::debug!("Unreadable request body: {}", rejection);
            return Err(EstimatorError::missing_address());
        }
    };

    let request = EstimateRequest::from_json(&body)?;

    let estimator = state
        .backend
        .estimator()
        .ok_or_else(EstimatorError::missing_api_key)?;

    let result = estimator.estimate(&request.address).await?;
    Ok(Json(result))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "configured": state.backend.is_configured(),
    }))
}
