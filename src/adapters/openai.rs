//! Client for the OpenAI Responses API.

use crate::config::ServiceConfig;
use crate::domain::model::RawModelResponse;
use crate::domain::ports::ListingSearch;
use crate::utils::error::{EstimatorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_LOGGED_BODY: usize = 512;

/// Builds the instruction sent to the model for one address.
pub fn build_prompt(address: &str) -> String {
    format!(
        "Search the web and give me the rent price and the square meters \
         for an apartment nearby this address. I want the price in soles (PEN):\n\
         {address}\n\n\
         Respond in this exact format:\n\
         PRICE: [PEN amount]\n\
         SIZE: [square meters]"
    )
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    output_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesReply {
    /// Joins every `output_text` part of every `message` item, in order.
    fn text(self) -> String {
        let joined: String = self
            .output
            .into_iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect();

        if joined.is_empty() {
            self.output_text.unwrap_or_default()
        } else {
            joined
        }
    }
}

pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    web_search: bool,
    timeout: Duration,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/responses", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            web_search: config.web_search,
            timeout: config.timeout(),
            retry_attempts: config.retry_attempts,
            retry_delay: config.retry_delay(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, address: &str) -> ResponsesRequest<'_> {
        let tools = if self.web_search {
            vec![Tool { kind: "web_search" }]
        } else {
            Vec::new()
        };

        ResponsesRequest {
            model: &self.model,
            input: build_prompt(address),
            tools,
        }
    }

    fn classify(&self, error: reqwest::Error) -> EstimatorError {
        if error.is_timeout() {
            EstimatorError::TimeoutError {
                seconds: self.timeout.as_secs(),
            }
        } else {
            EstimatorError::TransportError(error)
        }
    }

    async fn send_once(&self, body: &ResponsesRequest<'_>) -> Result<String> {
        tracing::debug!("Making model API request to: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::debug!("Model API response status: {}", status);

        let payload = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            let body: String = payload.chars().take(MAX_LOGGED_BODY).collect();
            return Err(EstimatorError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ResponsesReply = serde_json::from_str(&payload)?;
        Ok(reply.text().trim().to_string())
    }
}

#[async_trait]
impl ListingSearch for OpenAiClient {
    async fn search(&self, address: &str) -> Result<RawModelResponse> {
        let body = self.request_body(address);
        let mut attempt: u32 = 0;

        loop {
            match self.send_once(&body).await {
                Ok(text) => return Ok(RawModelResponse::new(text)),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Model API call failed ({}), retry {}/{} in {:?}",
                        e,
                        attempt,
                        self.retry_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
