use rsvp_core::{EventSummary, Phase, Registrant};

use crate::domain::{AppState, UiError};

use super::commands::DraftField;
use super::events::DomainEvent;

pub fn reduce(mut state: AppState, ev: DomainEvent) -> AppState {
    match ev {
        DomainEvent::BootstrapStarted => {
            state.error = None;
            state.phase = Phase::LoadingBootstrap;
        }

        DomainEvent::BootstrapLoaded {
            event,
            user,
            registered,
        } => apply_bootstrap(&mut state, event, user, registered),

        DomainEvent::BootstrapFailed { error } => {
            state.error = Some(error);
            state.phase = Phase::Error;
        }

        DomainEvent::ActionStarted => {
            state.pending = true;
            state.error = None;
            state.phase = Phase::LoadingAction;
        }

        DomainEvent::ActionFailed { error } => {
            state.error = Some(error);
            state.phase = Phase::Error;
        }

        DomainEvent::ActionSettled => state.pending = false,

        DomainEvent::DraftFieldChanged { field, value } => match field {
            DraftField::Name => state.draft.name = value,
            DraftField::Company => state.draft.company = value,
            DraftField::Phone => state.draft.phone = value,
            DraftField::Email => state.draft.email = value,
        },

        DomainEvent::NameEditRequested => {
            if state.phase == Phase::OfferRegister {
                state.phase = Phase::RegistrationForm;
            }
        }

        DomainEvent::SnapshotRestored {
            event,
            user,
            registered,
            phase,
        } => {
            state.registered = registered && event.is_some() && user.is_some();
            match (&event, &user) {
                (_, Some(user)) => state.draft.seed_from_user(user, &state.default_name),
                (Some(_), None) => state.draft.seed_for_form(&state.default_name),
                _ => {}
            }
            state.event = event;
            state.user = user;
            state.phase = phase.for_snapshot();
        }

        DomainEvent::HostUnavailable => {
            state.error = Some(UiError::no_host());
            state.phase = Phase::Error;
        }
    }
    state
}

/// Applies a bootstrap payload: normalizes the registered flag, seeds the
/// draft and picks the next display phase.
fn apply_bootstrap(
    state: &mut AppState,
    event: Option<EventSummary>,
    user: Option<Registrant>,
    registered: bool,
) {
    // The flag means nothing without both records behind it.
    let registered = registered && event.is_some() && user.is_some();

    state.phase = match (&event, &user) {
        (None, _) => Phase::Empty,
        (Some(_), None) => {
            state.draft.seed_for_form(&state.default_name);
            Phase::RegistrationForm
        }
        (Some(_), Some(user)) if !registered => {
            state.draft.seed_from_user(user, &state.default_name);
            Phase::OfferRegister
        }
        (Some(_), Some(_)) => Phase::Registered,
    };

    state.event = event;
    state.user = user;
    state.registered = registered;
    state.error = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event() -> EventSummary {
        EventSummary {
            id: Some(json!(1)),
            title: Some("Autumn meetup".to_string()),
            ..Default::default()
        }
    }

    fn user() -> Registrant {
        Registrant {
            name: Some("Anna".to_string()),
            company: Some("Acme".to_string()),
            ..Default::default()
        }
    }

    fn loaded(
        event: Option<EventSummary>,
        user: Option<Registrant>,
        registered: bool,
    ) -> DomainEvent {
        DomainEvent::BootstrapLoaded {
            event,
            user,
            registered,
        }
    }

    fn with_default_name(name: &str) -> AppState {
        AppState {
            default_name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_event_lands_on_the_empty_screen() {
        let state = reduce(AppState::default(), loaded(None, None, false));
        assert_eq!(state.phase, Phase::Empty);
        assert_eq!(state.event, None);
    }

    #[test]
    fn event_without_user_opens_the_form_with_the_default_name() {
        let state = reduce(
            with_default_name("Anna Schmidt"),
            loaded(Some(event()), None, false),
        );
        assert_eq!(state.phase, Phase::RegistrationForm);
        assert_eq!(state.draft.name, "Anna Schmidt");
        assert_eq!(state.draft.company, "");
    }

    #[test]
    fn typed_name_survives_a_fresh_bootstrap() {
        let mut state = with_default_name("Anna Schmidt");
        state.draft.name = "Custom".to_string();
        let state = reduce(state, loaded(Some(event()), None, false));
        assert_eq!(state.draft.name, "Custom");
    }

    #[test]
    fn known_user_not_registered_gets_the_offer_with_a_seeded_draft() {
        let state = reduce(
            with_default_name("Fallback"),
            loaded(Some(event()), Some(user()), false),
        );
        assert_eq!(state.phase, Phase::OfferRegister);
        assert_eq!(state.draft.name, "Anna");
        assert_eq!(state.draft.company, "Acme");
        assert_eq!(state.draft.phone, "");
    }

    #[test]
    fn registered_user_lands_on_registered() {
        let state = reduce(
            AppState::default(),
            loaded(Some(event()), Some(user()), true),
        );
        assert_eq!(state.phase, Phase::Registered);
        assert!(state.registered);
    }

    #[test]
    fn registered_flag_without_a_user_is_dropped() {
        let state = reduce(AppState::default(), loaded(Some(event()), None, true));
        assert!(!state.registered);
        assert_eq!(state.phase, Phase::RegistrationForm);
    }

    #[test]
    fn action_failure_leaves_pending_alone() {
        let mut state = AppState::default();
        state.pending = true;
        let state = reduce(
            state,
            DomainEvent::ActionFailed {
                error: UiError::validation("bad phone"),
            },
        );
        assert!(state.pending);
        assert_eq!(state.phase, Phase::Error);

        let state = reduce(state, DomainEvent::ActionSettled);
        assert!(!state.pending);
    }

    #[test]
    fn bootstrap_start_clears_a_previous_error() {
        let mut state = AppState::default();
        state.error = Some(UiError::network("boom"));
        let state = reduce(state, DomainEvent::BootstrapStarted);
        assert_eq!(state.error, None);
        assert_eq!(state.phase, Phase::LoadingBootstrap);
    }

    #[test]
    fn name_edit_only_applies_from_the_offer_phase() {
        let mut offered = AppState::default();
        offered.phase = Phase::OfferRegister;
        let state = reduce(offered, DomainEvent::NameEditRequested);
        assert_eq!(state.phase, Phase::RegistrationForm);

        let mut registered = AppState::default();
        registered.phase = Phase::Registered;
        let state = reduce(registered, DomainEvent::NameEditRequested);
        assert_eq!(state.phase, Phase::Registered);
    }

    #[test]
    fn restored_snapshot_keeps_its_phase_and_normalizes_the_flag() {
        let state = reduce(
            AppState::default(),
            DomainEvent::SnapshotRestored {
                event: Some(event()),
                user: None,
                registered: true,
                phase: Phase::LoadingAction,
            },
        );
        assert_eq!(state.phase, Phase::Empty);
        assert!(!state.registered);

        let state = reduce(
            AppState::default(),
            DomainEvent::SnapshotRestored {
                event: Some(event()),
                user: Some(user()),
                registered: true,
                phase: Phase::Registered,
            },
        );
        assert_eq!(state.phase, Phase::Registered);
        assert!(state.registered);
        assert_eq!(state.draft.name, "Anna");
    }
}
