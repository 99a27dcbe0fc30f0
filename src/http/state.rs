use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::concierge::Concierge;
use crate::schedule::ActivityMonitor;
use crate::store::BookingStore;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub monitor: ActivityMonitor,
    pub store: Arc<dyn BookingStore>,
    pub concierge: Arc<dyn Concierge>,
    pub clock: Arc<dyn Clock>,
    /// Host shown on scheduled sessions
    pub host_name: String,
    pub host_image: String,
    /// booking id → scheduled session id, so a cancelled booking can drop
    /// its session from the monitor
    pub sessions: Arc<RwLock<HashMap<String, String>>>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        monitor: ActivityMonitor,
        store: Arc<dyn BookingStore>,
        concierge: Arc<dyn Concierge>,
        clock: Arc<dyn Clock>,
        host_name: impl Into<String>,
        host_image: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            monitor,
            store,
            concierge,
            clock,
            host_name: host_name.into(),
            host_image: host_image.into(),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
