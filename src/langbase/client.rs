use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::types::{PipeRequest, PipeResponse};
use crate::config::{LangbaseConfig, RequestConfig};
use crate::error::{GenerationError, GenerationResult};
use crate::generation::{Candidate, GenerationRequest, TextGenerator};

/// Client for interacting with Langbase Pipes API
#[derive(Clone)]
pub struct LangbaseClient {
    client: Client,
    base_url: String,
    api_key: String,
    pipe_name: String,
    request_config: RequestConfig,
}

impl LangbaseClient {
    /// Create a new Langbase client
    pub fn new(config: &LangbaseConfig, request_config: RequestConfig) -> GenerationResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(GenerationError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            pipe_name: config.pipe.clone(),
            request_config,
        })
    }

    /// Call a Langbase pipe with the given request
    pub async fn call_pipe(&self, request: PipeRequest) -> GenerationResult<PipeResponse> {
        let url = format!("{}/v1/pipes/run", self.base_url);
        let pipe_name = request.name.clone();

        let mut last_error = None;
        let mut retries = 0;

        while retries <= self.request_config.max_retries {
            if retries > 0 {
                let delay = backoff_delay(self.request_config.retry_delay_ms, retries);
                warn!(
                    pipe = %pipe_name,
                    retry = retries,
                    delay_ms = delay.as_millis(),
                    "Retrying Langbase request"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();

            match self.execute_request(&url, &request).await {
                Ok(response) => {
                    info!(
                        pipe = %pipe_name,
                        latency_ms = start.elapsed().as_millis(),
                        "Langbase pipe call succeeded"
                    );
                    return Ok(response);
                }
                Err(e) => {
                    error!(
                        pipe = %pipe_name,
                        error = %e,
                        latency_ms = start.elapsed().as_millis(),
                        retry = retries,
                        "Langbase pipe call failed"
                    );
                    // A single attempt surfaces its own error unchanged
                    if self.request_config.max_retries == 0 {
                        return Err(e);
                    }
                    last_error = Some(e);
                    retries += 1;
                }
            }
        }

        Err(GenerationError::Unavailable {
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "Unknown error".to_string()),
            retries: retries.saturating_sub(1),
        })
    }

    /// Execute a single request (internal)
    async fn execute_request(
        &self,
        url: &str,
        request: &PipeRequest,
    ) -> GenerationResult<PipeResponse> {
        debug!(
            pipe = %request.name,
            messages = request.messages.len(),
            "Calling Langbase pipe"
        );

        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    GenerationError::Http(e)
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&error_body),
            });
        }

        let pipe_response: PipeResponse =
            response
                .json()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        GenerationError::Timeout {
                            timeout_ms: self.request_config.timeout_ms,
                        }
                    } else {
                        GenerationError::InvalidResponse {
                            message: format!("Failed to parse response: {}", e),
                        }
                    }
                })?;

        if !pipe_response.success {
            return Err(GenerationError::InvalidResponse {
                message: "Pipe reported success=false".to_string(),
            });
        }

        Ok(pipe_response)
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Name of the pipe this client runs
    pub fn pipe_name(&self) -> &str {
        &self.pipe_name
    }
}

/// Exponential backoff before retry number `retry` (1-based), saturating at `u64::MAX` ms.
fn backoff_delay(retry_delay_ms: u64, retry: u32) -> Duration {
    let factor = 2_u64.checked_pow(retry.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(retry_delay_ms.saturating_mul(factor))
}

/// Pull `error.message` out of a JSON error body, or return the body as is.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl TextGenerator for LangbaseClient {
    async fn generate(&self, request: GenerationRequest) -> GenerationResult<Vec<Candidate>> {
        let pipe_request = PipeRequest::from_generation(&self.pipe_name, &request);
        let response = self.call_pipe(pipe_request).await?;
        Ok(response.candidates())
    }
}
