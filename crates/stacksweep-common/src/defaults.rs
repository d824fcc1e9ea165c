//! Default configuration values shared across the sweep
//!
//! These constants keep discovery filtering and wait behavior consistent
//! between the CLI and the orchestrator.

/// Maximum length of the raw service name before the stack separator is appended
pub const MAX_SERVICE_NAME_LEN: usize = 16;

/// Separator appended to the truncated service name to form the stack prefix
pub const STACK_SEPARATOR: char = '-';

/// Lifecycle states considered "live" during discovery.
///
/// The search service reports states with inconsistent casing across
/// resource families, so both spellings are listed where they occur.
pub const LIVE_STATES: &[&str] = &[
    "RUNNING", "Running", "AVAILABLE", "STOPPED", "Stopped", "ACTIVE", "CREATED", "INACTIVE",
];

/// Resource types excluded from discovery results.
///
/// These are ephemeral network attachment objects that are removed by the
/// provider together with their parent resource.
pub const EXCLUDED_RESOURCE_TYPES: &[&str] = &["PrivateIp", "Vnic"];

/// Default total timeout for a delete-and-wait operation (20 minutes)
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 1200;

/// Initial delay between lifecycle-state polls
pub const DEFAULT_POLL_INITIAL_SECS: u64 = 2;

/// Maximum delay between lifecycle-state polls
pub const DEFAULT_POLL_MAX_SECS: u64 = 15;

/// Check whether a lifecycle state counts as live for discovery purposes
pub fn is_live_state(state: &str) -> bool {
    LIVE_STATES.contains(&state)
}
