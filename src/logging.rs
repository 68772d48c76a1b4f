use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "ART_ANALYZE_LOG";

/// Installs the stderr subscriber.
///
/// Level is controlled by `ART_ANALYZE_LOG`, e.g. `ART_ANALYZE_LOG=debug`.
pub fn init() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("art_analyze=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!("ArtAnalyze starting");
    Ok(())
}
