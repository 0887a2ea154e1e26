use axum::http::StatusCode;
use thiserror::Error;

pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const API_KEY_MISSING: &str = "Server misconfiguration: OPENAI_API_KEY not set.";

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Model API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Model API request timed out after {seconds}s")]
    TimeoutError { seconds: u64 },

    #[error("Model API returned HTTP {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing credential: {variable} is not set")]
    MissingCredentialError { variable: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Upstream,
    Internal,
}

impl EstimatorError {
    pub fn missing_address() -> Self {
        Self::ValidationError {
            message: ADDRESS_REQUIRED.to_string(),
        }
    }

    pub fn missing_api_key() -> Self {
        Self::MissingCredentialError {
            variable: "OPENAI_API_KEY".to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingCredentialError { .. } => ErrorCategory::Configuration,
            Self::TransportError(_) | Self::TimeoutError { .. } | Self::UpstreamError { .. } => {
                ErrorCategory::Upstream
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status surfaced to API callers.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError { .. } => StatusCode::BAD_REQUEST,
            Self::TimeoutError { .. } => StatusCode::GATEWAY_TIMEOUT,
            Self::TransportError(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            Self::TransportError(_) | Self::UpstreamError { .. } | Self::SerializationError(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to API callers. Upstream details stay in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::MissingCredentialError { variable } => {
                format!("Server misconfiguration: {} not set.", variable)
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Server misconfiguration.".to_string()
            }
            Self::TimeoutError { .. } => "The estimation service timed out.".to_string(),
            Self::TransportError(e) if e.is_timeout() => {
                "The estimation service timed out.".to_string()
            }
            Self::TransportError(_) | Self::UpstreamError { .. } | Self::SerializationError(_) => {
                "The estimation service is unavailable.".to_string()
            }
            Self::IoError(_) => "Internal server error.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Resubmit the request with a non-empty address",
            ErrorCategory::Configuration => {
                "Fix the configuration (e.g. export OPENAI_API_KEY) and restart the service"
            }
            ErrorCategory::Upstream => "Retry later; check connectivity to the model API",
            ErrorCategory::Internal => "Check the service logs",
        }
    }

    /// Whether a failed model call is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransportError(e) => !e.is_builder() && !e.is_decode(),
            Self::TimeoutError { .. } => true,
            Self::UpstreamError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
