//! Central configuration constants for endpoints, retry limits and defaults.

/// Automation webhook every action envelope is POSTed to.
pub const DEFAULT_ENDPOINT: &str = "https://hooks.macroevent.app/webhook/event-registration";

/// Version string carried in every envelope as `meta.appVersion`.
pub const APP_VERSION: &str = "1.0.0";

/// Per-attempt network timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

/// Extra attempts after the first. Total attempts = retries + 1.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Inter-attempt delays in milliseconds. Retry `k` (1-indexed) sleeps
/// `RETRY_BACKOFF_MS[min(k - 1, len - 1)]` before re-sending.
pub const RETRY_BACKOFF_MS: [u64; 2] = [300, 1_000];

/// Minimum allowed per-attempt timeout override.
pub const MIN_TIMEOUT_MS: u64 = 1_000;

/// Maximum allowed per-attempt timeout override.
pub const MAX_TIMEOUT_MS: u64 = 120_000;

/// File name of the persisted snapshot inside the state directory.
pub const SNAPSHOT_FILE: &str = "event_snapshot_v1.json";

/// Convenience function to clamp a timeout override into allowed range.
pub fn clamp_timeout_ms(v: u64) -> u64 {
    v.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS)
}
