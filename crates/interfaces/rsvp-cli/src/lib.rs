pub mod commands;
pub mod host;

pub use commands::CliOptions;
pub use host::TerminalHost;
