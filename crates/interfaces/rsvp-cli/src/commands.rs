use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use camino::Utf8PathBuf;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;

use rsvp_app_core::{
    main_button, screen, AppCommand, AppState, DraftField, RegistrationController, Screen,
};
use rsvp_core::{EventSummary, MainButtonState, Phase};
use rsvp_net::{default_http_client, ActionGateway, RetryPolicy};
use rsvp_persistence::{FileSnapshotStore, SnapshotStore};

use crate::host::TerminalHost;

/// Values of the global flags shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub endpoint: String,
    pub init_data: Option<String>,
    pub context: Option<String>,
    pub state_dir: Option<Utf8PathBuf>,
    pub timeout_ms: Option<u64>,
}

pub type CliController = RegistrationController<ActionGateway, FileSnapshotStore, TerminalHost>;

/// Restores the cached snapshot, runs the host handshake plus the first
/// bootstrap and prints the resulting screen.
pub async fn cmd_status(opts: &CliOptions) -> anyhow::Result<AppState> {
    let controller = build_controller(opts)?;

    controller.restore_snapshot();
    let cached = controller.store.state();
    if cached.phase != Phase::Idle {
        println!(":: Cached state ({})", cached.phase.as_str());
        print_state(&cached);
    }

    let pb = loading_spinner("Fetching event state...");
    controller.startup().await;
    pb.finish_and_clear();

    let state = controller.store.state();
    println!(":: Live state ({})", state.phase.as_str());
    print_state(&state);
    Ok(state)
}

/// Bootstraps, overlays the given fields on the seeded draft, submits the
/// registration and prints the outcome.
pub async fn cmd_register(
    opts: &CliOptions,
    name: Option<String>,
    company: Option<String>,
    phone: Option<String>,
    email: Option<String>,
) -> anyhow::Result<AppState> {
    let controller = build_controller(opts)?;
    controller.restore_snapshot();

    let pb = loading_spinner("Fetching event state...");
    controller.startup().await;
    pb.finish_and_clear();

    let state = controller.store.state();
    if state.phase == Phase::Error {
        println!(":: Cannot register, startup failed");
        print_state(&state);
        return Ok(state);
    }

    let fields = [
        (DraftField::Name, name),
        (DraftField::Company, company),
        (DraftField::Phone, phone),
        (DraftField::Email, email),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            controller
                .dispatch(AppCommand::DraftChanged(field, value))
                .await;
        }
    }

    let pb = loading_spinner("Submitting registration...");
    controller.dispatch(AppCommand::Register).await;
    pb.finish_and_clear();

    let state = controller.store.state();
    println!(":: Registration result ({})", state.phase.as_str());
    print_state(&state);
    Ok(state)
}

/// Bootstraps and withdraws the registration for the current event.
pub async fn cmd_unregister(opts: &CliOptions) -> anyhow::Result<AppState> {
    let controller = build_controller(opts)?;
    controller.restore_snapshot();

    let pb = loading_spinner("Fetching event state...");
    controller.startup().await;
    pb.finish_and_clear();

    let state = controller.store.state();
    if state.phase == Phase::Error {
        println!(":: Cannot unregister, startup failed");
        print_state(&state);
        return Ok(state);
    }

    let pb = loading_spinner("Withdrawing registration...");
    controller.dispatch(AppCommand::Unregister).await;
    pb.finish_and_clear();

    let state = controller.store.state();
    println!(":: Unregistration result ({})", state.phase.as_str());
    print_state(&state);
    Ok(state)
}

/// Prints the persisted snapshot document, if one exists.
pub fn cmd_snapshot_show(opts: &CliOptions) -> anyhow::Result<()> {
    let store = snapshot_store(opts)?;
    println!(":: Snapshot file: {}", store.path());
    match store.load() {
        Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        None => println!("   No readable snapshot."),
    }
    Ok(())
}

/// Drops the persisted snapshot. Safe to run when none exists.
pub fn cmd_snapshot_clear(opts: &CliOptions) -> anyhow::Result<()> {
    let store = snapshot_store(opts)?;
    store.clear();
    println!(":: Cleared snapshot at {}", store.path());
    Ok(())
}

fn snapshot_store(opts: &CliOptions) -> anyhow::Result<FileSnapshotStore> {
    match &opts.state_dir {
        Some(dir) => Ok(FileSnapshotStore::in_dir(dir)),
        None => {
            FileSnapshotStore::in_default_dir().context("Failed to resolve the state directory")
        }
    }
}

fn build_controller(opts: &CliOptions) -> anyhow::Result<CliController> {
    let host = TerminalHost::from_flags(opts.context.as_deref(), opts.init_data.clone())?;
    let endpoint = Url::parse(&opts.endpoint).context("Invalid endpoint URL")?;

    let mut policy = RetryPolicy::default();
    if let Some(ms) = opts.timeout_ms {
        policy = policy.with_timeout(Duration::from_millis(rsvp_config::clamp_timeout_ms(ms)));
    }

    let client = default_http_client().context("Failed to build HTTP client")?;
    let gateway = ActionGateway::new(client, endpoint, policy, Arc::new(host.clone()));
    let controller = RegistrationController::new(gateway, snapshot_store(opts)?, host);

    // Ctrl-C cancels the in-flight backend call.
    let cancel = controller.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    Ok(controller)
}

fn loading_spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

fn print_state(state: &AppState) {
    match screen(state) {
        Screen::Loading => println!("   Loading..."),
        Screen::NoEvent => println!("   No event is open for registration."),
        Screen::RegistrationForm { event, draft } => {
            print_event(&event);
            println!("   Name:    {}", field_or_dash(&draft.name));
            println!("   Company: {}", field_or_dash(&draft.company));
            println!("   Phone:   {}", field_or_dash(&draft.phone));
            println!("   Email:   {}", field_or_dash(&draft.email));
        }
        Screen::OfferRegister { event, name } => {
            print_event(&event);
            println!("   Known registrant: {}", field_or_dash(&name));
        }
        Screen::Registered { event, user } => {
            print_event(&event);
            println!(
                "   Registered: {}",
                field_or_dash(user.name.as_deref().unwrap_or(""))
            );
        }
        Screen::Error { error } => println!("   Error [{}]: {}", error.code, error.message),
    }
    if let MainButtonState::Visible { label, .. } = main_button(state) {
        println!("   Action: [{}]", label);
    }
}

fn print_event(event: &EventSummary) {
    println!(
        "   Event: {}",
        event.title.as_deref().unwrap_or("(untitled event)")
    );
    if let Some(about) = event.short_description.as_deref() {
        println!("   About: {}", about);
    }
}

fn field_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
