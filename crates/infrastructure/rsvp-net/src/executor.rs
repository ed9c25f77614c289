use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::TransportError;

/// Retry budget and timing for one logical call.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Time budget for each attempt's request/response-header exchange.
    pub attempt_timeout: Duration,
    /// Extra attempts after the first. Total attempts = max_retries + 1.
    pub max_retries: u32,
    /// Inter-attempt delays; retry `k` sleeps `backoff[min(k-1, len-1)]`.
    pub backoff: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_millis(rsvp_config::DEFAULT_TIMEOUT_MS),
            max_retries: rsvp_config::DEFAULT_MAX_RETRIES,
            backoff: rsvp_config::RETRY_BACKOFF_MS
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (1-indexed). The schedule's last entry
    /// repeats once the index runs past the end.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let last = match self.backoff.len() {
            0 => return Duration::ZERO,
            n => n - 1,
        };
        self.backoff[(attempt as usize - 1).min(last)]
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }
}

/// Issues one JSON POST with bounded retries.
///
/// Every attempt races the send against the per-attempt timeout and the
/// caller's cancellation token; backoff sleeps race the token too, so an
/// external cancel is honored between attempts as well as during them.
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// POSTs `body` to `url` and returns the decoded JSON response body.
    ///
    /// A body that is not decodable JSON is replaced by a synthesized
    /// `{ok:false, error:{code:"INVALID_RESPONSE"}}` envelope instead of
    /// failing the call. A non-2xx status surfaces [`TransportError::Http`]
    /// carrying whatever body was decoded; statuses of 500 and above are
    /// retried, everything below is an authoritative answer.
    pub async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        policy: &RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<Value, TransportError> {
        let mut attempt: u32 = 0;
        loop {
            match self.attempt(url, body, policy, cancel).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retriable() && attempt < policy.max_retries => {
                    attempt += 1;
                    let delay = policy.backoff_delay(attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "retrying request"
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(err) => {
                    warn!(attempts = attempt + 1, error = %err, "request failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(
        &self,
        url: &Url,
        body: &Value,
        policy: &RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<Value, TransportError> {
        let send = self.client.post(url.clone()).json(body).send();
        // The timeout budgets the request/header exchange; body collection
        // below stays cancellable through the external token.
        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            _ = tokio::time::sleep(policy.attempt_timeout) => {
                return Err(TransportError::Timeout {
                    timeout: policy.attempt_timeout,
                })
            }
            res = send => res.map_err(TransportError::Network)?,
        };

        let status = response.status();
        let bytes = tokio::select! {
            _ = cancel.cancelled() => return Err(TransportError::Cancelled),
            res = response.bytes() => res.map_err(TransportError::Network)?,
        };

        let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| invalid_response());
        if !status.is_success() {
            return Err(TransportError::Http { status, body: value });
        }
        Ok(value)
    }
}

/// Client used when the caller has no special transport needs. One client
/// serves every attempt of every call so retries reuse its connection pool.
pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(format!("rsvp/{}", rsvp_config::APP_VERSION))
        .build()
}

/// Envelope substituted for a body that is not decodable JSON.
fn invalid_response() -> Value {
    json!({
        "ok": false,
        "error": {
            "code": rsvp_core::envelope::codes::INVALID_RESPONSE,
            "message": "malformed response",
        }
    })
}
