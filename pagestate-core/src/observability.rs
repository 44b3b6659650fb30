/*!
Tracing setup for binaries and tests.
*/

use tracing_subscriber::EnvFilter;

/// Install a global tracing subscriber filtered by `RUST_LOG`
///
/// Falls back to `info` when no filter is configured. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
