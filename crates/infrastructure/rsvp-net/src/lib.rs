//! Network layer: the resilient request executor and the action gateway
//! that wraps every backend call in the webhook envelope.

pub mod error;
pub mod executor;
pub mod gateway;

pub use error::{GatewayError, TransportError};
pub use executor::{default_http_client, RequestExecutor, RetryPolicy};
pub use gateway::{ActionGateway, InvokeOptions};
