use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. A no-op when logging is disabled in
/// the configuration or when a subscriber is already installed (tests install
/// their own).
pub fn init(enabled: bool) {
    if !enabled {
        return;
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reptile=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
