use audex_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, storage, pipeline, routes)
    let (_state, router) = audex_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    audex_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
