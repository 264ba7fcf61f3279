use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rentingcar_web::config::Config;
use rentingcar_web::db::MemoryStore;
use rentingcar_web::{app, seed, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rentingcar_web=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("loading configuration")?;

    let store = MemoryStore::new();
    if config.seed_sample_data {
        seed::seed_store(&store, config.sample_fleet_size)
            .await
            .context("seeding sample data")?;
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(store, config);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    info!("Listening on {} (cache: {:?})", bind_addr, state.cache.stats());

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
