use rsvp_core::envelope::{codes, ErrorInfo};
use rsvp_core::{Draft, EventSummary, Phase, Registrant};

/// Error shown on the error screen: a machine code plus a display message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub code: String,
    pub message: String,
}

impl UiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Transport or protocol failure below the business layer.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(codes::NETWORK, message)
    }

    /// Client-side field check failure; never reached the network.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(codes::VALIDATION_ERROR, message)
    }

    /// Running outside a host platform.
    pub fn no_host() -> Self {
        Self::new(codes::NO_HOST, "open this app inside its host platform")
    }

    /// Business error from a `{ok: false}` response. Fields the backend
    /// left out fall back to the given defaults.
    pub fn from_envelope(error: Option<ErrorInfo>, code: &str, message: &str) -> Self {
        let error = error.unwrap_or_default();
        Self {
            code: error.code.unwrap_or_else(|| code.to_owned()),
            message: error.message.unwrap_or_else(|| message.to_owned()),
        }
    }
}

/// Whole client state. One value, owned by the store, rebuilt by the
/// reducer on every event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub phase: Phase,
    pub event: Option<EventSummary>,
    pub user: Option<Registrant>,
    pub registered: bool,
    pub error: Option<UiError>,
    pub draft: Draft,
    /// True while a register/unregister call is in flight. Re-entrant
    /// submissions are ignored until it clears.
    pub pending: bool,
    /// Host-provided display name used to seed an untouched draft.
    pub default_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_errors_fall_back_field_by_field() {
        let full = UiError::from_envelope(
            Some(ErrorInfo::new("EVENT_CLOSED", "registration closed")),
            codes::INTERNAL,
            "registration failed",
        );
        assert_eq!(full.code, "EVENT_CLOSED");
        assert_eq!(full.message, "registration closed");

        let code_only = UiError::from_envelope(
            Some(ErrorInfo {
                code: Some("EVENT_CLOSED".to_string()),
                message: None,
            }),
            codes::INTERNAL,
            "registration failed",
        );
        assert_eq!(code_only.code, "EVENT_CLOSED");
        assert_eq!(code_only.message, "registration failed");

        let absent = UiError::from_envelope(None, codes::UNKNOWN, "unknown error");
        assert_eq!(absent.code, codes::UNKNOWN);
        assert_eq!(absent.message, "unknown error");
    }
}
