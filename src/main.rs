use anyhow::{Context, Result};
use daymaker2day::{
    create_router, ActivityMonitor, AppState, BookingStore, Catalog, Config, GenerativeConcierge,
    HttpBookingStore, InMemoryBookingStore, SystemClock,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/daymaker2day")?;

    info!("{} v0.1.0", cfg.service.name);

    let catalog = Arc::new(Catalog::builtin()?);
    info!("Loaded catalog: {} offerings", catalog.len());

    let clock: Arc<dyn daymaker2day::Clock> = Arc::new(SystemClock);
    let monitor = ActivityMonitor::new(Arc::clone(&catalog), Arc::clone(&clock));
    monitor
        .start(Duration::from_secs(cfg.schedule.poll_interval_secs))
        .await;

    let store: Arc<dyn BookingStore> = if cfg.persistence.base_url.is_empty() {
        info!("No persistence service configured, using in-memory bookings");
        Arc::new(InMemoryBookingStore::new())
    } else {
        info!("Booking service: {}", cfg.persistence.base_url);
        Arc::new(HttpBookingStore::new(cfg.persistence.base_url.clone()))
    };

    let concierge = Arc::new(GenerativeConcierge::new(
        cfg.concierge.api_url.clone(),
        cfg.concierge.api_key.clone(),
    ));

    let state = AppState::new(
        catalog,
        monitor.clone(),
        store,
        concierge,
        clock,
        cfg.host.name.clone(),
        cfg.host.image.clone(),
    );
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
