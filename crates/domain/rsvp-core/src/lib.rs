//! Domain model for the mini-app registration client: the webhook envelope,
//! event and registrant records, flow phases, draft validation, and the
//! host platform capability surface.

pub mod envelope;
pub mod host;
pub mod phase;
pub mod registration;
pub mod validate;

pub use envelope::{ActionRequest, ActionResponse, ErrorInfo, RequestMeta};
pub use host::{
    HostBridge, HostContext, HostUser, MainButtonState, NullHostBridge, PrimaryIntent,
};
pub use phase::Phase;
pub use registration::{BootstrapData, Draft, EventSummary, Registrant};
pub use validate::{RegistrationFields, ValidationError};
