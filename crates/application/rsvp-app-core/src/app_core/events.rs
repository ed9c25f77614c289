use rsvp_core::{EventSummary, Phase, Registrant};

use crate::domain::UiError;

use super::commands::DraftField;

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Bootstrap lifecycle
    BootstrapStarted,
    BootstrapLoaded {
        event: Option<EventSummary>,
        user: Option<Registrant>,
        registered: bool,
    },
    BootstrapFailed {
        error: UiError,
    },

    // Register/unregister lifecycle
    ActionStarted,
    ActionFailed {
        error: UiError,
    },
    ActionSettled,

    // Local edits
    DraftFieldChanged {
        field: DraftField,
        value: String,
    },
    NameEditRequested,

    // Startup
    SnapshotRestored {
        event: Option<EventSummary>,
        user: Option<Registrant>,
        registered: bool,
        phase: Phase,
    },
    HostUnavailable,
}
