use crate::config::toml_config::TomlConfig;
use crate::config::ServiceConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "rent-estimator")]
#[command(about = "Estimates rent, apartment size and price per m² for an address")]
pub struct CliConfig {
    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to listen on (default 127.0.0.1:5000)")]
    pub bind: Option<String>,

    #[arg(long, help = "Model identifier sent to the provider (default gpt-5.1)")]
    pub model: Option<String>,

    #[arg(long, help = "Provider API base URL")]
    pub base_url: Option<String>,

    #[arg(long, help = "Per-request timeout for the model call")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Extra attempts after a failed model call")]
    pub retry_attempts: Option<u32>,

    #[arg(long, help = "Delay between model call attempts")]
    pub retry_delay_ms: Option<u64>,

    #[arg(long, help = "Do not attach the web search tool to model requests")]
    pub no_web_search: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves the final configuration: defaults, then `--config`, then the
    /// environment, then flags given on the command line.
    pub fn resolve(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration file: {}", path.display());
            config.apply_file(&TomlConfig::from_file(path)?);
        }

        config.apply_env(|name| std::env::var(name).ok());
        self.apply_flags(&mut config);

        Ok(config)
    }

    fn apply_flags(&self, config: &mut ServiceConfig) {
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(attempts) = self.retry_attempts {
            config.retry_attempts = attempts;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.retry_delay_ms = delay;
        }
        if self.no_web_search {
            config.web_search = false;
        }
    }
}
