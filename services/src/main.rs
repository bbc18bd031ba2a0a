use seawatch_services::{config::Config, routes, store::CsvLogStore, telemetry};
use seawatch_utils::version_info;
use std::net::{IpAddr, SocketAddr};
use tracing::info;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    telemetry::init_tracing();

    // Print build information
    print_build_info();

    // Load configuration
    let config: Config = Config::init()?;
    info!(
        environment = %config.environment(),
        server_addr = %config.server_addr(),
        port = %config.port(),
        logs_dir = %config.logs_dir().display(),
        "Configuration loaded"
    );

    // Open the detection log directory
    let store = CsvLogStore::new(config.logs_dir())?;

    // Build the application router
    let route = routes(store, config.clone()).await;

    // Create socket address
    let addr = SocketAddr::from((config.server_addr().parse::<IpAddr>()?, config.port()));

    info!("Starting server on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, route).await?;

    Ok(())
}

/// Print build information
fn print_build_info() {
    info!("===========================================");
    info!("  Seawatch Services");
    info!("===========================================");
    info!("Build Date:   {}", version_info::build_date());
    info!("Build Commit: {}", version_info::build_commit());
    info!("===========================================");
}
