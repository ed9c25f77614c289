use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logical primary action a phase can offer. The host button and the
/// in-page control both carry the same intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryIntent {
    Refresh,
    Register,
    Unregister,
    Retry,
}

/// Requested state of the host's programmable action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainButtonState {
    Hidden,
    Visible {
        label: String,
        intent: PrimaryIntent,
    },
}

/// Identity of the person the host platform authenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HostUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl HostUser {
    /// Display name joined from the first and last name fields.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_owned()
    }
}

/// Point-in-time copy of what the host platform exposes. Forwarded to the
/// backend opaquely as the envelope's `context`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    /// Raw signed init blob, also forwarded as `meta.hostToken`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<HostUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_params: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_date: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport_stable_height: Option<f64>,
}

/// Capability surface of the embedding platform. Everything the client
/// reads from its host goes through this trait; nothing touches platform
/// globals directly.
pub trait HostBridge: Send + Sync {
    /// Whether a real host platform is present. When false the flow shows
    /// the no-host error instead of calling the backend.
    fn is_available(&self) -> bool;

    /// Point-in-time context snapshot, `None` when unavailable.
    fn context(&self) -> Option<HostContext>;

    /// Opaque signed token blob; empty when the host has none.
    fn init_data(&self) -> String {
        self.context().and_then(|c| c.init_data).unwrap_or_default()
    }

    /// Display name for pre-filling the registration form.
    fn default_name(&self) -> String {
        self.context()
            .and_then(|c| c.user)
            .map(|u| u.display_name())
            .unwrap_or_default()
    }

    /// Asks the host to expand the viewport. Best effort.
    fn expand(&self);

    /// Tells the host the first render is done. Best effort.
    fn ready(&self);

    /// Drives the host's primary action button. Callers reset to
    /// [`MainButtonState::Hidden`] before re-arming on every render pass.
    fn set_main_button(&self, button: MainButtonState);
}

/// Stand-in used outside a host platform: reports unavailable and ignores
/// viewport and button calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHostBridge;

impl HostBridge for NullHostBridge {
    fn is_available(&self) -> bool {
        false
    }

    fn context(&self) -> Option<HostContext> {
        None
    }

    fn expand(&self) {}

    fn ready(&self) {}

    fn set_main_button(&self, _button: MainButtonState) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_joins_present_parts() {
        let both = HostUser {
            first_name: Some("Anna".to_string()),
            last_name: Some("Schmidt".to_string()),
            ..Default::default()
        };
        assert_eq!(both.display_name(), "Anna Schmidt");

        let first_only = HostUser {
            first_name: Some("Anna".to_string()),
            ..Default::default()
        };
        assert_eq!(first_only.display_name(), "Anna");

        let last_only = HostUser {
            last_name: Some("Schmidt".to_string()),
            ..Default::default()
        };
        assert_eq!(last_only.display_name(), "Schmidt");

        assert_eq!(HostUser::default().display_name(), "");
    }

    #[test]
    fn null_bridge_reports_unavailable_and_empty_identity() {
        let bridge = NullHostBridge;
        assert!(!bridge.is_available());
        assert_eq!(bridge.context(), None);
        assert_eq!(bridge.init_data(), "");
        assert_eq!(bridge.default_name(), "");
    }

    #[test]
    fn context_omits_absent_fields_on_the_wire() {
        let ctx = HostContext {
            platform: Some("webview".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&ctx).expect("expected context to serialize");
        let obj = value.as_object().expect("expected object");
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["platform"], "webview");
    }

    #[test]
    fn bridge_identity_defaults_read_from_context() {
        struct Fixed;
        impl HostBridge for Fixed {
            fn is_available(&self) -> bool {
                true
            }
            fn context(&self) -> Option<HostContext> {
                Some(HostContext {
                    init_data: Some("signed-blob".to_string()),
                    user: Some(HostUser {
                        first_name: Some("Anna".to_string()),
                        last_name: Some("Schmidt".to_string()),
                        ..Default::default()
                    }),
                    ..Default::default()
                })
            }
            fn expand(&self) {}
            fn ready(&self) {}
            fn set_main_button(&self, _button: MainButtonState) {}
        }

        let bridge = Fixed;
        assert_eq!(bridge.init_data(), "signed-blob");
        assert_eq!(bridge.default_name(), "Anna Schmidt");
    }
}
