use anyhow::Context;
use tracing::debug;

use rsvp_core::{HostBridge, HostContext, MainButtonState};

/// Terminal stand-in for the embedding platform: the context comes from a
/// flag instead of a live host, viewport signals become log lines and the
/// action button is reported instead of rendered.
#[derive(Debug, Clone, Default)]
pub struct TerminalHost {
    context: Option<HostContext>,
}

impl TerminalHost {
    /// Builds the host from the CLI flags. `context` is inline JSON or a
    /// path to a JSON file; `init_data` overrides the token inside it.
    /// Without either flag the host reports itself unavailable.
    pub fn from_flags(context: Option<&str>, init_data: Option<String>) -> anyhow::Result<Self> {
        let mut context = match context {
            Some(raw) => Some(parse_context(raw)?),
            None => None,
        };
        if let Some(token) = init_data {
            context.get_or_insert_with(HostContext::default).init_data = Some(token);
        }
        Ok(Self { context })
    }
}

fn parse_context(raw: &str) -> anyhow::Result<HostContext> {
    let json = if raw.trim_start().starts_with('{') {
        raw.to_owned()
    } else {
        std::fs::read_to_string(raw)
            .with_context(|| format!("Failed to read context file {}", raw))?
    };
    serde_json::from_str(&json).context("Failed to parse host context JSON")
}

impl HostBridge for TerminalHost {
    fn is_available(&self) -> bool {
        self.context.is_some()
    }

    fn context(&self) -> Option<HostContext> {
        self.context.clone()
    }

    fn expand(&self) {
        debug!("host signal: expand viewport");
    }

    fn ready(&self) {
        debug!("host signal: first render done");
    }

    fn set_main_button(&self, button: MainButtonState) {
        match button {
            MainButtonState::Hidden => debug!("main button: hidden"),
            MainButtonState::Visible { label, intent } => {
                debug!(%label, ?intent, "main button: armed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_json_becomes_the_host_context() {
        let host = TerminalHost::from_flags(
            Some(r#"{"initData": "blob", "user": {"firstName": "Anna"}}"#),
            None,
        )
        .expect("expected inline context to parse");
        assert!(host.is_available());
        assert_eq!(host.init_data(), "blob");
        assert_eq!(host.default_name(), "Anna");
    }

    #[test]
    fn init_data_flag_wins_over_the_context_blob() {
        let host = TerminalHost::from_flags(
            Some(r#"{"initData": "from-context"}"#),
            Some("from-flag".to_string()),
        )
        .expect("expected context to parse");
        assert_eq!(host.init_data(), "from-flag");
    }

    #[test]
    fn init_data_alone_makes_the_host_available() {
        let host = TerminalHost::from_flags(None, Some("blob".to_string()))
            .expect("expected host to build");
        assert!(host.is_available());
        assert_eq!(host.init_data(), "blob");
        assert_eq!(host.default_name(), "");
    }

    #[test]
    fn no_flags_means_no_host() {
        let host = TerminalHost::from_flags(None, None).expect("expected host to build");
        assert!(!host.is_available());
        assert_eq!(host.context(), None);
    }

    #[test]
    fn context_file_is_read_from_disk() {
        let dir = tempfile::tempdir().expect("expected a temp dir");
        let path = dir.path().join("context.json");
        std::fs::write(&path, r#"{"platform": "terminal"}"#).expect("expected write to succeed");

        let host = TerminalHost::from_flags(Some(path.to_str().expect("utf-8 path")), None)
            .expect("expected file context to parse");
        let context = host.context().expect("expected a context");
        assert_eq!(context.platform.as_deref(), Some("terminal"));
    }

    #[test]
    fn malformed_context_is_a_hard_error() {
        assert!(TerminalHost::from_flags(Some("{ not json"), None).is_err());
        assert!(TerminalHost::from_flags(Some("/no/such/file.json"), None).is_err());
    }
}
