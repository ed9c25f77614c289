use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use rsvp_core::ActionResponse;
use rsvp_net::{ActionGateway, GatewayError, InvokeOptions};

/// Backend surface the controller drives. Production wires the real
/// gateway; tests script responses.
#[async_trait]
pub trait GatewayPort: Send + Sync + 'static {
    async fn invoke(
        &self,
        action: &str,
        data: Value,
        cancel: &CancellationToken,
    ) -> Result<ActionResponse, GatewayError>;
}

#[async_trait]
impl GatewayPort for ActionGateway {
    async fn invoke(
        &self,
        action: &str,
        data: Value,
        cancel: &CancellationToken,
    ) -> Result<ActionResponse, GatewayError> {
        ActionGateway::invoke(self, action, data, InvokeOptions::default(), cancel).await
    }
}
