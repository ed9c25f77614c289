use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use rsvp_core::envelope::{ActionRequest, ActionResponse, RequestMeta};
use rsvp_core::host::HostBridge;

use crate::error::GatewayError;
use crate::executor::{RequestExecutor, RetryPolicy};

/// Per-call knobs for a gateway invocation.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    /// Overrides the configured per-attempt timeout for this call.
    pub timeout: Option<Duration>,
}

/// Wraps every backend call in the webhook envelope and checks the minimal
/// response shape. Legacy response field names are handled once, by the
/// typed payload decoders in `rsvp-core`; nothing above this layer sees
/// them.
pub struct ActionGateway {
    executor: RequestExecutor,
    endpoint: Url,
    policy: RetryPolicy,
    bridge: Arc<dyn HostBridge>,
    app_version: String,
}

impl ActionGateway {
    pub fn new(
        client: Client,
        endpoint: Url,
        policy: RetryPolicy,
        bridge: Arc<dyn HostBridge>,
    ) -> Self {
        Self {
            executor: RequestExecutor::new(client),
            endpoint,
            policy,
            bridge,
            app_version: rsvp_config::APP_VERSION.to_string(),
        }
    }

    /// Sends `action` with `data` and returns the decoded response.
    ///
    /// The envelope context and host token are read from the bridge at call
    /// time. Post-condition: the response decodes to an object with a
    /// boolean `ok`, otherwise [`GatewayError::Protocol`].
    pub async fn invoke(
        &self,
        action: &str,
        data: Value,
        opts: InvokeOptions,
        cancel: &CancellationToken,
    ) -> Result<ActionResponse, GatewayError> {
        let envelope = ActionRequest {
            action: action.to_owned(),
            data,
            context: self.bridge.context(),
            meta: RequestMeta {
                host_token: self.bridge.init_data(),
                app_version: self.app_version.clone(),
            },
        };
        let body = serde_json::to_value(&envelope).map_err(GatewayError::Encode)?;

        let policy = match opts.timeout {
            Some(timeout) => self.policy.clone().with_timeout(timeout),
            None => self.policy.clone(),
        };

        debug!(action, "invoking backend action");
        let value = self
            .executor
            .post_json(&self.endpoint, &body, &policy, cancel)
            .await?;

        ActionResponse::from_value(&value).ok_or(GatewayError::Protocol)
    }
}
