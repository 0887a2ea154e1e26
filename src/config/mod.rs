#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_socket_addr, validate_url, Validate,
};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const BIND_VAR: &str = "RENT_ESTIMATOR_BIND";

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5.1";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Process-wide settings, resolved once at startup and immutable afterwards.
///
/// Layering, lowest precedence first: defaults, TOML file, environment, CLI flags.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: String,
    /// `None` puts the service in degraded mode: pages are served, `/api/rent` answers 500.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub web_search: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            web_search: true,
        }
    }
}

// api_key 不能出現在日誌裡
impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("bind", &self.bind)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("web_search", &self.web_search)
            .finish()
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ServiceConfig {
    pub fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(bind) = file.bind() {
            self.bind = bind.to_string();
        }

        let openai = file.openai();
        if let Some(key) = openai.api_key.and_then(non_blank) {
            self.api_key = Some(key);
        }
        if let Some(base_url) = openai.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = openai.model {
            self.model = model;
        }
        if let Some(timeout) = openai.timeout_seconds {
            self.timeout_seconds = timeout;
        }
        if let Some(attempts) = openai.retry_attempts {
            self.retry_attempts = attempts;
        }
        if let Some(delay) = openai.retry_delay_ms {
            self.retry_delay_ms = delay;
        }
        if let Some(web_search) = openai.web_search {
            self.web_search = web_search;
        }
    }

    /// Overlays variables returned by `lookup`. An empty `OPENAI_API_KEY` counts as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_VAR).and_then(non_blank) {
            self.api_key = Some(key);
        }
        if let Some(base_url) = lookup(BASE_URL_VAR).and_then(non_blank) {
            self.base_url = base_url;
        }
        if let Some(model) = lookup(MODEL_VAR).and_then(non_blank) {
            self.model = model;
        }
        if let Some(bind) = lookup(BIND_VAR).and_then(non_blank) {
            self.bind = bind;
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        validate_socket_addr("bind", &self.bind)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 3600)?;
        validate_range("retry_attempts", self.retry_attempts, 0, 5)?;
        validate_range("retry_delay_ms", self.retry_delay_ms, 0, 60_000)?;

        // 缺少 API key 不算驗證失敗，服務以降級模式啟動
        Ok(())
    }
}
