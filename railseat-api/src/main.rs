use anyhow::Context;
use railseat_api::{app, AppState};
use railseat_catalog::RouteCatalog;
use railseat_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "railseat_api=debug,railseat_order=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Railseat API on port {}", config.server.port);

    let catalog = RouteCatalog::from_seeds(&config.routes, config.inventory.seats_per_section)
        .context("Invalid route configuration")?;
    tracing::info!(
        "Loaded {} trains with {} seats per section",
        catalog.len(),
        catalog.seats_per_section()
    );

    let app = app(AppState::new(catalog, config.events.channel_capacity));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
