use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rsvp_core::{EventSummary, Phase, Registrant};

/// Point-in-time copy of the phase-relevant state, written after every
/// successful bootstrap. Never authoritative; used only to pre-render
/// before the first live bootstrap answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub event: Option<EventSummary>,
    #[serde(default)]
    pub user: Option<Registrant>,
    #[serde(default, alias = "is_registered_for_current_event")]
    pub registered: bool,
    pub phase: Phase,
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl Snapshot {
    /// Returns the snapshot with its phase coerced to a display phase.
    /// Transient loading phases are never persisted verbatim.
    pub fn normalized(mut self) -> Self {
        self.phase = self.phase.for_snapshot();
        self
    }
}

/// Best-effort store for the last known display state.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Persists the snapshot. Failures are swallowed; the cache is an
    /// optimization, not a source of truth.
    fn save(&self, snapshot: &Snapshot);

    /// Returns the stored snapshot, or `None` on absence or parse failure.
    fn load(&self) -> Option<Snapshot>;

    /// Removes the stored snapshot if present.
    fn clear(&self);
}
