use chrono::Utc;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use rsvp_core::envelope::codes;
use rsvp_core::{BootstrapData, HostBridge, MainButtonState};
use rsvp_persistence::{Snapshot, SnapshotStore};

use crate::app_core::{AppCommand, AppStore, DomainEvent};
use crate::domain::{AppState, UiError};
use crate::ports::GatewayPort;
use crate::viewmodel;

/// Drives the registration flow: owns the store, talks to the backend
/// through the gateway port, keeps the snapshot cache warm and mirrors
/// every state change onto the host's action button.
pub struct RegistrationController<G, S, H> {
    pub store: AppStore,
    gateway: G,
    snapshots: S,
    host: H,
    cancel: CancellationToken,
}

impl<G, S, H> RegistrationController<G, S, H>
where
    G: GatewayPort,
    S: SnapshotStore,
    H: HostBridge,
{
    pub fn new(gateway: G, snapshots: S, host: H) -> Self {
        let state = AppState {
            default_name: host.default_name(),
            ..AppState::default()
        };
        Self {
            store: AppStore::new(state),
            gateway,
            snapshots,
            host,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that aborts any in-flight backend call when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Pre-renders the last persisted state, if any. Never authoritative;
    /// the first live bootstrap replaces it.
    pub fn restore_snapshot(&self) {
        if let Some(snapshot) = self.snapshots.load() {
            debug!(phase = snapshot.phase.as_str(), "restored snapshot");
            self.apply(DomainEvent::SnapshotRestored {
                event: snapshot.event,
                user: snapshot.user,
                registered: snapshot.registered,
                phase: snapshot.phase,
            });
        }
    }

    /// Host handshake and the first bootstrap. Without a host platform the
    /// flow stops on the no-host error instead of calling the backend.
    pub async fn startup(&self) {
        if !self.host.is_available() {
            self.apply(DomainEvent::HostUnavailable);
            return;
        }
        self.host.expand();
        self.host.ready();
        self.bootstrap().await;
    }

    pub async fn dispatch(&self, cmd: AppCommand) {
        match cmd {
            AppCommand::Bootstrap => self.bootstrap().await,
            AppCommand::Register => self.register().await,
            AppCommand::Unregister => self.unregister().await,
            AppCommand::DraftChanged(field, value) => {
                self.apply(DomainEvent::DraftFieldChanged { field, value });
            }
            AppCommand::EditName => self.apply(DomainEvent::NameEditRequested),
        }
    }

    /// Fetches the authoritative state and applies the transition rules.
    /// A snapshot is persisted only when the fetch succeeded.
    async fn bootstrap(&self) {
        self.apply(DomainEvent::BootstrapStarted);

        let outcome = self
            .gateway
            .invoke("bootstrap", json!({}), &self.cancel)
            .await;
        let ev = match outcome {
            Ok(response) if response.ok => match BootstrapData::decode(response.data.as_ref()) {
                Ok(data) => {
                    let registered = data.registered();
                    DomainEvent::BootstrapLoaded {
                        event: data.event,
                        user: data.user,
                        registered,
                    }
                }
                Err(err) => {
                    debug!(error = %err, "bootstrap payload failed to decode");
                    DomainEvent::BootstrapFailed {
                        error: UiError::new(codes::INVALID_RESPONSE, "malformed response"),
                    }
                }
            },
            Ok(response) => DomainEvent::BootstrapFailed {
                error: UiError::from_envelope(response.error, codes::UNKNOWN, "unknown error"),
            },
            Err(err) => DomainEvent::BootstrapFailed {
                error: UiError::network(err.to_string()),
            },
        };

        let loaded = matches!(ev, DomainEvent::BootstrapLoaded { .. });
        self.apply(ev);
        if loaded {
            self.save_snapshot();
        }
    }

    /// Validates the draft, submits it, then re-bootstraps on success so the
    /// registered state always comes from the backend.
    async fn register(&self) {
        let state = self.store.state();
        if state.pending {
            debug!("register ignored, another action is pending");
            return;
        }

        let fields = match rsvp_core::validate::registration(&state.draft) {
            Ok(fields) => fields,
            Err(err) => {
                self.apply(DomainEvent::ActionFailed {
                    error: UiError::validation(err.to_string()),
                });
                return;
            }
        };

        self.apply(DomainEvent::ActionStarted);

        let payload = json!({
            "name": fields.name,
            "company": fields.company,
            "phone": fields.phone,
            "email": fields.email,
        });
        match self.gateway.invoke("register", payload, &self.cancel).await {
            Ok(response) if response.ok => {
                info!("registration accepted, refetching state");
                self.bootstrap().await;
            }
            Ok(response) => self.apply(DomainEvent::ActionFailed {
                error: UiError::from_envelope(
                    response.error,
                    codes::INTERNAL,
                    "registration failed",
                ),
            }),
            Err(err) => self.apply(DomainEvent::ActionFailed {
                error: UiError::network(err.to_string()),
            }),
        }

        self.apply(DomainEvent::ActionSettled);
    }

    async fn unregister(&self) {
        let state = self.store.state();
        if state.pending {
            debug!("unregister ignored, another action is pending");
            return;
        }
        let Some(event_id) = state
            .event
            .and_then(|e| e.id)
            .filter(|id| !id.is_null())
        else {
            debug!("unregister skipped, current event has no id");
            return;
        };

        self.apply(DomainEvent::ActionStarted);

        let payload = json!({ "eventId": event_id });
        match self
            .gateway
            .invoke("unregister", payload, &self.cancel)
            .await
        {
            Ok(response) if response.ok => {
                info!("unregistration accepted, refetching state");
                self.bootstrap().await;
            }
            Ok(response) => self.apply(DomainEvent::ActionFailed {
                error: UiError::from_envelope(
                    response.error,
                    codes::INTERNAL,
                    "unregistration failed",
                ),
            }),
            Err(err) => self.apply(DomainEvent::ActionFailed {
                error: UiError::network(err.to_string()),
            }),
        }

        self.apply(DomainEvent::ActionSettled);
    }

    fn save_snapshot(&self) {
        let state = self.store.state();
        self.snapshots.save(&Snapshot {
            event: state.event,
            user: state.user,
            registered: state.registered,
            phase: state.phase,
            saved_at: Utc::now(),
        });
    }

    /// Applies one event, then re-syncs the host button: reset to hidden
    /// first, then re-arm for the new phase.
    fn apply(&self, ev: DomainEvent) {
        self.store.apply(ev);
        self.host.set_main_button(MainButtonState::Hidden);
        let button = viewmodel::main_button(&self.store.state());
        if button != MainButtonState::Hidden {
            self.host.set_main_button(button);
        }
    }
}
