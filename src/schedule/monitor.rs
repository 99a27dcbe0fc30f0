use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::window::{classify_session, WindowPosition};
use crate::booking::ScheduledSession;
use crate::catalog::Catalog;
use crate::clock::Clock;

/// Cadence at which scheduled sessions are re-checked against the clock.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Watches the scheduled-session collection and publishes the single
/// session whose activity window currently contains "now".
///
/// When several windows overlap, the first session in stored order wins on
/// every evaluation until the collection changes. A real multi-session
/// view would need an explicit earliest-start tie-break; this scan policy
/// is kept as-is and documented as a known limitation.
#[derive(Clone)]
pub struct ActivityMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    sessions: RwLock<Vec<ScheduledSession>>,
    active_tx: watch::Sender<Option<ScheduledSession>>,
    poll_handle: Mutex<Option<JoinHandle<()>>>,
}

impl ActivityMonitor {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        let (active_tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(MonitorInner {
                catalog,
                clock,
                sessions: RwLock::new(Vec::new()),
                active_tx,
                poll_handle: Mutex::new(None),
            }),
        }
    }

    /// Receiver that observes every change of the currently joinable
    /// session (or None when nothing is joinable).
    pub fn subscribe(&self) -> watch::Receiver<Option<ScheduledSession>> {
        self.inner.active_tx.subscribe()
    }

    /// The currently joinable session, if any.
    pub fn current(&self) -> Option<ScheduledSession> {
        self.inner.active_tx.borrow().clone()
    }

    pub async fn sessions(&self) -> Vec<ScheduledSession> {
        self.inner.sessions.read().await.clone()
    }

    /// Register a confirmed booking and re-evaluate immediately.
    pub async fn add_session(&self, session: ScheduledSession) {
        info!("Scheduling session {} ({})", session.id, session.service_title);
        {
            let mut sessions = self.inner.sessions.write().await;
            sessions.push(session);
        }
        self.inner.reevaluate().await;
    }

    /// Drop a session (ended or cancelled) and re-evaluate immediately.
    pub async fn remove_session(&self, session_id: &str) -> Option<ScheduledSession> {
        let removed = {
            let mut sessions = self.inner.sessions.write().await;
            let index = sessions.iter().position(|s| s.id == session_id)?;
            sessions.remove(index)
        };
        info!("Removed session {}", session_id);
        self.inner.reevaluate().await;
        Some(removed)
    }

    /// Re-run the window scan against the current clock reading.
    pub async fn reevaluate(&self) {
        self.inner.reevaluate().await;
    }

    /// Spawn the fixed-cadence poll loop. The first tick fires
    /// immediately; subsequent ticks follow `interval`.
    pub async fn start(&self, interval: Duration) {
        let weak: Weak<MonitorInner> = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                inner.reevaluate().await;
            }
        });

        let mut handle = self.inner.poll_handle.lock().await;
        if let Some(old) = handle.replace(task) {
            old.abort();
        }
    }

    /// Stop the poll loop. Pending timer continuations must not fire
    /// after teardown.
    pub async fn shutdown(&self) {
        let mut handle = self.inner.poll_handle.lock().await;
        if let Some(task) = handle.take() {
            task.abort();
        }
    }
}

impl MonitorInner {
    /// Scan the collection in stored order and publish the first session
    /// that is in-window. Malformed slots and dangling service ids are
    /// handled inside the evaluator and never take the poll down.
    async fn reevaluate(&self) {
        let now = self.clock.now();
        let active = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .find(|s| classify_session(s, &self.catalog, now) == WindowPosition::InWindow)
                .cloned()
        };

        self.active_tx.send_if_modified(|current| {
            if *current != active {
                match &active {
                    Some(session) => debug!("Session {} is now joinable", session.id),
                    None => debug!("No session is currently joinable"),
                }
                *current = active;
                true
            } else {
                false
            }
        });
    }
}
