use rsvp_core::envelope::codes;
use rsvp_core::{Draft, EventSummary, MainButtonState, Phase, PrimaryIntent, Registrant};

use crate::domain::{AppState, UiError};

/// What the renderer should put on screen. Pure projection of [`AppState`];
/// a display phase whose backing data went missing degrades to the empty
/// screen instead of panicking on a tampered snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    NoEvent,
    RegistrationForm { event: EventSummary, draft: Draft },
    OfferRegister { event: EventSummary, name: String },
    Registered { event: EventSummary, user: Registrant },
    Error { error: UiError },
}

pub fn screen(state: &AppState) -> Screen {
    match state.phase {
        Phase::Idle | Phase::LoadingBootstrap | Phase::LoadingAction => Screen::Loading,
        Phase::Empty => Screen::NoEvent,
        Phase::RegistrationForm => match &state.event {
            Some(event) => Screen::RegistrationForm {
                event: event.clone(),
                draft: state.draft.clone(),
            },
            None => Screen::NoEvent,
        },
        Phase::OfferRegister => match &state.event {
            Some(event) => Screen::OfferRegister {
                event: event.clone(),
                name: state.draft.name.clone(),
            },
            None => Screen::NoEvent,
        },
        Phase::Registered => match (&state.event, &state.user) {
            (Some(event), Some(user)) => Screen::Registered {
                event: event.clone(),
                user: user.clone(),
            },
            _ => Screen::NoEvent,
        },
        Phase::Error => Screen::Error {
            error: state
                .error
                .clone()
                .unwrap_or_else(|| UiError::new(codes::UNKNOWN, "unknown error")),
        },
    }
}

/// Host button for the active phase. Loading phases hide it; every display
/// phase arms exactly one primary intent.
pub fn main_button(state: &AppState) -> MainButtonState {
    let (label, intent) = match state.phase {
        Phase::Idle | Phase::LoadingBootstrap | Phase::LoadingAction => {
            return MainButtonState::Hidden
        }
        Phase::Empty => ("Refresh", PrimaryIntent::Refresh),
        Phase::RegistrationForm | Phase::OfferRegister => ("Register", PrimaryIntent::Register),
        Phase::Registered => ("Unregister", PrimaryIntent::Unregister),
        Phase::Error => ("Try again", PrimaryIntent::Retry),
    };
    MainButtonState::Visible {
        label: label.to_owned(),
        intent,
    }
}
