//! Phase machine for the registration flow: the state value, domain events,
//! pure reducer, store, the controller that drives them against the gateway
//! and snapshot ports, and the screen projection.

pub mod app_core;
pub mod controller;
pub mod domain;
pub mod ports;
pub mod viewmodel;

pub use app_core::{reduce, AppCommand, AppStore, DomainEvent, DraftField};
pub use controller::RegistrationController;
pub use domain::{AppState, UiError};
pub use ports::GatewayPort;
pub use viewmodel::{main_button, screen, Screen};
