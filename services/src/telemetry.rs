use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing before configuration is loaded, so config loading
/// itself is visible. The output format keys off the raw `ENV` variable:
/// pretty printing locally, one JSON object per line everywhere else.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,seawatch_services=debug"));

    let local = matches!(std::env::var("ENV").as_deref(), Ok("local") | Err(_));
    if local {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
}
