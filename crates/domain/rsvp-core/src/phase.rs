use serde::{Deserialize, Serialize};

/// Flow state. Exactly one phase is active at a time and it alone decides
/// what is rendered and which primary action is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    LoadingBootstrap,
    LoadingAction,
    #[serde(rename = "ui_empty")]
    Empty,
    #[serde(rename = "ui_registration_form")]
    RegistrationForm,
    #[serde(rename = "ui_offer_register")]
    OfferRegister,
    #[serde(rename = "ui_registered")]
    Registered,
    #[serde(rename = "ui_error")]
    Error,
}

impl Phase {
    /// True for settled display phases, false for transient loading states.
    pub fn is_display(self) -> bool {
        matches!(
            self,
            Phase::Empty
                | Phase::RegistrationForm
                | Phase::OfferRegister
                | Phase::Registered
                | Phase::Error
        )
    }

    /// Phase a snapshot may carry. Display phases persist as-is, transient
    /// phases fall back to the empty screen.
    pub fn for_snapshot(self) -> Phase {
        if self.is_display() {
            self
        } else {
            Phase::Empty
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::LoadingBootstrap => "loading_bootstrap",
            Phase::LoadingAction => "loading_action",
            Phase::Empty => "ui_empty",
            Phase::RegistrationForm => "ui_registration_form",
            Phase::OfferRegister => "ui_offer_register",
            Phase::Registered => "ui_registered",
            Phase::Error => "ui_error",
        }
    }
}
