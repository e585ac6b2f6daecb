//! `log`-facade instrumentation shared by the detectors and the CLI
//! harness. The detectors themselves call `log::trace!`/`log::debug!`
//! directly at their phase transitions; this module holds the handful of
//! cross-cutting helpers that don't belong to one detector specifically.

use log::warn;

/// A frame arrived with a timestamp not strictly greater than the
/// previous one (spec §7: "out-of-order or stalled timestamps"). The
/// caller still drops the sample from derivative computation; this just
/// surfaces that it happened, since a tracker producing these repeatedly
/// is itself a signal something upstream is unhealthy.
pub fn warn_non_monotonic_frame(joint: &str, previous_us: u64, received_us: u64) {
    warn!(
        "non-monotonic timestamp for {joint}: previous={previous_us}us received={received_us}us, dropping from derivatives"
    );
}

/// Initializes `env_logger` from `RUST_LOG` (or `default_filter` if unset),
/// the way `kiosk_cli` wants logging configured for a replay run. Library
/// crates never call this themselves — only binaries own the logger.
pub fn init_from_env(default_filter: &str) {
    env_logger_init(default_filter);
}

#[cfg(not(test))]
fn env_logger_init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
fn env_logger_init(_default_filter: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warn_non_monotonic_frame_does_not_panic() {
        warn_non_monotonic_frame("ankle_right", 1_000, 500);
    }
}
