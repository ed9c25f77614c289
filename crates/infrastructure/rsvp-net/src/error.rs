use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of one webhook call, surfaced once the executor's retry budget
/// is spent or a non-retriable condition fired.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP {}", .status.as_u16())]
    Http {
        status: StatusCode,
        /// Decoded (or synthesized) response body, kept for diagnostics.
        body: Value,
    },
    #[error("request timed out after {}ms", .timeout.as_millis())]
    Timeout { timeout: Duration },
    #[error("request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Whether the retry loop may try again. Caller-initiated cancellation
    /// never retries; sub-500 statuses are authoritative answers.
    pub fn is_retriable(&self) -> bool {
        match self {
            TransportError::Network(_) => true,
            TransportError::Timeout { .. } => true,
            TransportError::Http { status, .. } => status.is_server_error(),
            TransportError::Cancelled => false,
        }
    }
}

/// Failure of a gateway invocation.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not encode request envelope: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed response from server")]
    Protocol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_errors_and_transient_failures_retry() {
        let server = TransportError::Http {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: Value::Null,
        };
        assert!(server.is_retriable());

        let client = TransportError::Http {
            status: StatusCode::BAD_REQUEST,
            body: Value::Null,
        };
        assert!(!client.is_retriable());

        assert!(TransportError::Timeout {
            timeout: Duration::from_secs(1)
        }
        .is_retriable());
        assert!(!TransportError::Cancelled.is_retriable());
    }

    #[test]
    fn http_error_displays_bare_status() {
        let err = TransportError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: Value::Null,
        };
        assert_eq!(err.to_string(), "HTTP 503");
    }
}
