use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::HostContext;

/// Error codes the client surfaces or synthesizes.
pub mod codes {
    /// Body was not decodable JSON.
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";
    /// Transport or protocol failure below the business layer.
    pub const NETWORK: &str = "NETWORK";
    /// A draft field failed client-side validation.
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// Running outside a host platform.
    pub const NO_HOST: &str = "NO_HOST";
    /// Server reported a failure without details of its own.
    pub const INTERNAL: &str = "INTERNAL";
    /// Business error that carried no code.
    pub const UNKNOWN: &str = "UNKNOWN";
}

/// Wrapper sent as the body of every webhook call.
#[derive(Debug, Clone, Serialize)]
pub struct ActionRequest {
    pub action: String,
    pub data: Value,
    /// Point-in-time host context, `null` outside a host platform.
    pub context: Option<HostContext>,
    pub meta: RequestMeta,
}

/// Client identification attached to every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    /// Opaque signed blob handed over by the host; empty when absent.
    pub host_token: String,
    pub app_version: String,
}

/// Wrapper returned by the webhook.
///
/// Only `ok` is load-bearing. `data` is interpreted per action; `error`
/// tolerates the partial shapes older backend revisions emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl ActionResponse {
    /// Lenient decode. `ok` must be a boolean on a JSON object; everything
    /// else is best effort and an unreadable `error` decodes as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let ok = value.get("ok")?.as_bool()?;
        Some(Self {
            ok,
            data: value.get("data").filter(|d| !d.is_null()).cloned(),
            error: value
                .get("error")
                .and_then(|e| serde_json::from_value(e.clone()).ok()),
        })
    }
}

/// Error payload carried inside a `{ok: false}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ErrorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorInfo {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }
}
