//! Tessellab - interactive triangle tessellation viewer

use anyhow::Result;
use tessellab_viewer::{App, DEFAULT_LOG_FILTER, run};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let settings = tessellab_core::settings::load();
    tracing::info!("Starting Tessellab");

    run(App::new(settings))
}
