use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use rsvp_cli::{commands, CliOptions};
use rsvp_core::Phase;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Webhook endpoint receiving every action envelope
    #[arg(long, global = true, default_value = rsvp_config::DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Signed host token blob forwarded as `meta.hostToken`
    #[arg(long, global = true)]
    init_data: Option<String>,
    /// Host context, inline JSON or a path to a JSON file
    #[arg(long, global = true)]
    context: Option<String>,
    /// Directory for the snapshot file (defaults to the platform state dir)
    #[arg(long, global = true)]
    state_dir: Option<Utf8PathBuf>,
    /// Per-attempt network timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore the snapshot, contact the backend and print the current screen
    Status,
    /// Fill the registration form and submit it
    Register {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Withdraw the registration for the current event
    Unregister,
    /// Inspect or drop the persisted snapshot
    Snapshot {
        #[command(subcommand)]
        command: SnapshotCommands,
    },
}

#[derive(Subcommand)]
enum SnapshotCommands {
    Show,
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    let opts = CliOptions {
        endpoint: cli.endpoint,
        init_data: cli.init_data,
        context: cli.context,
        state_dir: cli.state_dir,
        timeout_ms: cli.timeout_ms,
    };

    let final_state = match cli.command {
        Commands::Status => Some(commands::cmd_status(&opts).await?),
        Commands::Register {
            name,
            company,
            phone,
            email,
        } => Some(commands::cmd_register(&opts, name, company, phone, email).await?),
        Commands::Unregister => Some(commands::cmd_unregister(&opts).await?),
        Commands::Snapshot { command } => {
            match command {
                SnapshotCommands::Show => commands::cmd_snapshot_show(&opts)?,
                SnapshotCommands::Clear => commands::cmd_snapshot_clear(&opts)?,
            }
            None
        }
    };

    // A flow that ends on the error screen fails the invocation.
    if matches!(final_state, Some(state) if state.phase == Phase::Error) {
        std::process::exit(1);
    }

    Ok(())
}
