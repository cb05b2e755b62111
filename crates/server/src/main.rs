use anyhow::{Context, Result};
use filler::{DocumentFiller, Template};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use manualgen_server::{build_router, AppState, Config, TempDirStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "manualgen={0},manualgen_server={0},filler={0},tower_http={0}",
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting manualgen v{}", env!("CARGO_PKG_VERSION"));

    // Read once; every fill parses its own copy
    let template = Template::from_path(&config.template_path)
        .with_context(|| format!("Failed to read template {}", config.template_path.display()))?;
    let page = template
        .page_size()
        .with_context(|| format!("Template {} is not usable", config.template_path.display()))?;
    info!(
        "Template {} ({}x{}pt)",
        config.template_path.display(),
        page.width,
        page.height
    );

    let fonts = config.font_table();
    for (weight, path) in fonts.iter() {
        if !path.is_file() {
            warn!("Font for weight {weight} not found at {}", path.display());
        }
    }

    let store = TempDirStore::new(&config.output_dir);
    info!("Writing generated files to {}", store.dir().display());

    let state = AppState::new(DocumentFiller::new(template, fonts), store);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
