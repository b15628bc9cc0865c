use tracing::{error, info};
use drone_storefront::app_system::{setup_tracing, Config, StoreSystem, SystemError};
use drone_storefront::http::{serve, AppState};

#[tokio::main]
async fn main() -> Result<(), SystemError> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting drone storefront");

    let config = Config::load()?;

    // Start every actor, then hand clones of the clients to the HTTP layer
    let system = StoreSystem::new(&config);
    let state = AppState::new(&system);

    let served = serve(state, config.port).await;
    if let Err(e) = &served {
        error!(error = %e, "Server stopped with an error");
    }

    // Shutdown system gracefully
    system.shutdown().await?;
    served?;

    info!("Application completed successfully");
    Ok(())
}
