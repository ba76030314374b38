use crate::api::{self, AppState};
use crate::config::{Settings, StoreBackend};
use crate::models::sample_properties;
use crate::search::SearchOrchestrator;
use crate::sources::{ExternalApiSource, PrimarySource, StaticSource};
use crate::store::{MemoryStore, MongoStore, PropertyStore};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Open the configured document store. The caller owns the handle and
/// must [`PropertyStore::close`] it on shutdown.
pub async fn open_store(settings: &Settings) -> Result<Arc<dyn PropertyStore>> {
    let store: Arc<dyn PropertyStore> = match settings.store.backend {
        StoreBackend::Mongo => Arc::new(MongoStore::connect(&settings.store).await?),
        StoreBackend::Memory => {
            warn!("Using the in-memory store; listings are lost on exit");
            Arc::new(MemoryStore::with_properties(sample_properties()))
        }
    };
    info!(backend = store.backend_name(), "Document store ready");
    Ok(store)
}

/// Primary store, then the external API if configured, then static listings
pub fn build_orchestrator(
    settings: &Settings,
    store: Arc<dyn PropertyStore>,
) -> Result<SearchOrchestrator> {
    let mut orchestrator =
        SearchOrchestrator::new(StaticSource::new()).with_tier(Arc::new(PrimarySource::new(store)));

    if let Some(api) = &settings.external_api {
        let external = ExternalApiSource::new(api).context("Failed to set up the external listings API")?;
        orchestrator = orchestrator.with_tier(Arc::new(external));
    }

    info!(tiers = ?orchestrator.tiers(), "Search tiers ready");
    Ok(orchestrator)
}

pub async fn serve(settings: &Settings) -> Result<()> {
    let store = open_store(settings).await?;
    let orchestrator = build_orchestrator(settings, store.clone())?;
    let app = api::router(AppState::new(store.clone(), orchestrator));

    let address = settings.socket_addr()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on http://{address}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated unexpectedly");

    store.close().await;
    info!("Server shutdown complete");
    served
}

/// Replace the store's contents with the sample listings
pub async fn seed(settings: &Settings) -> Result<()> {
    let store = open_store(settings).await?;
    let seeded = store
        .replace_all(sample_properties())
        .await
        .context("Failed to seed properties");
    store.close().await;

    let inserted = seeded?;
    info!(inserted, "Database seeding completed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
