//! HTTP surface: routes, shared state and error-to-response mapping.

pub mod handlers;
pub mod pages;

use crate::adapters::openai::OpenAiClient;
use crate::config::ServiceConfig;
use crate::core::estimator::RentEstimator;
use crate::utils::error::{ErrorCategory, EstimatorError, Result};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;

/// Either a ready estimator or the explicit marker for a missing credential.
#[derive(Clone)]
pub enum Backend {
    Ready(Arc<RentEstimator>),
    Unconfigured,
}

impl Backend {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        match &config.api_key {
            Some(api_key) => {
                let client = OpenAiClient::new(api_key.clone(), config)?;
                tracing::info!(
                    "Model client ready: model={}, endpoint={}, web_search={}",
                    config.model,
                    client.endpoint(),
                    config.web_search
                );
                Ok(Self::Ready(Arc::new(RentEstimator::new(Arc::new(client)))))
            }
            None => {
                tracing::warn!(
                    "OPENAI_API_KEY not set. /api/rent will return an error until it's configured."
                );
                Ok(Self::Unconfigured)
            }
        }
    }

    pub fn estimator(&self) -> Option<&RentEstimator> {
        match self {
            Self::Ready(estimator) => Some(estimator.as_ref()),
            Self::Unconfigured => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Backend,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/results", get(pages::results))
        .route("/api/rent", post(handlers::estimate_rent))
        .route("/health", get(handlers::health))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}

impl IntoResponse for EstimatorError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.category() {
            ErrorCategory::Validation => tracing::debug!("Rejected request: {}", self),
            ErrorCategory::Configuration => {
                tracing::error!("{} (💡 {})", self, self.recovery_suggestion())
            }
            ErrorCategory::Upstream | ErrorCategory::Internal => {
                tracing::error!("❌ Estimate failed: {}", self)
            }
        }

        let body = Json(serde_json::json!({ "error": self.user_friendly_message() }));
        (status, body).into_response()
    }
}
