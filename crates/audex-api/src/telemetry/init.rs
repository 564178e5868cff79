use audex_core::LogFormat;
use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "audex=debug,audex_api=debug,audex_processing=debug,audex_storage=debug,tower_http=debug";

/// Initialize tracing: `RUST_LOG`-style filter plus compact or JSON console output.
pub fn init_telemetry(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    match format {
        LogFormat::Compact => {
            let console_fmt = tracing_subscriber::fmt::layer().event_format(
                Format::default()
                    .compact()
                    .with_target(false)
                    .without_time(),
            );
            tracing_subscriber::registry()
                .with(filter)
                .with(console_fmt)
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
                .try_init()?;
        }
    }

    tracing::info!(format = ?format, "Telemetry initialized");
    Ok(())
}
