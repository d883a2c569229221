use mediagate_api::setup;
use mediagate_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    setup::telemetry::init_tracing();

    // Load configuration; the storage profile is fixed from here on.
    let config = Config::from_env()?;

    // Initialize the application (storage backend, routes)
    let (_state, router) = setup::initialize_app(config.clone()).await?;

    // Start the server
    setup::server::start_server(&config, router).await?;

    Ok(())
}
