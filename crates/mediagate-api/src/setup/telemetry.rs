//! Tracing initialization.

/// Initialize the tracing subscriber. `RUST_LOG` controls the filter,
/// defaulting to `info`. Safe to call more than once (later calls are no-ops,
/// which keeps integration tests happy).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init()
        .ok();
}
