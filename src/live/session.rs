use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::capture::{CaptureStream, ScreenCapture};
use super::counterparty::Counterparty;
use super::state::{ChatRole, LiveSessionState, SessionPhase};
use crate::booking::ScheduledSession;
use crate::prefs::{PreferenceStore, PREF_MUTED, PREF_VIDEO_ON};
use crate::schedule::ActivityMonitor;

#[derive(Debug, Clone)]
pub struct LiveSessionConfig {
    /// Cadence of the waiting/active second counters
    pub tick_interval: Duration,
    /// Media defaults applied when the view opens
    pub start_muted: bool,
    pub start_video_on: bool,
}

impl Default for LiveSessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            start_muted: false,
            start_video_on: true,
        }
    }
}

impl LiveSessionConfig {
    /// Media defaults from saved preferences, falling back to
    /// unmuted-with-camera when nothing is stored.
    pub fn with_preferences(prefs: &dyn PreferenceStore) -> Self {
        let mut config = Self::default();
        if let Some(value) = prefs.get(PREF_MUTED) {
            config.start_muted = value == "true";
        }
        if let Some(value) = prefs.get(PREF_VIDEO_ON) {
            config.start_video_on = value == "true";
        }
        config
    }
}

/// Drives one live session from the waiting room to the end of the call.
///
/// Owns every timer started for the session (second counters, host
/// auto-join, pending auto-replies, capture watcher). All of them are
/// aborted on `end`, on every exit path, so nothing mutates state after
/// teardown.
pub struct LiveSession {
    scheduled: ScheduledSession,
    state: Arc<Mutex<LiveSessionState>>,
    counterparty: Arc<dyn Counterparty>,
    capture: Arc<dyn ScreenCapture>,
    monitor: ActivityMonitor,
    ended: Arc<AtomicBool>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    capture_stream: Arc<Mutex<Option<CaptureStream>>>,
}

impl LiveSession {
    /// Open the live view for a joinable session: enters `Waiting`,
    /// starts the second counter, and arms the simulated host join.
    pub async fn open(
        scheduled: ScheduledSession,
        monitor: ActivityMonitor,
        counterparty: Arc<dyn Counterparty>,
        capture: Arc<dyn ScreenCapture>,
        config: LiveSessionConfig,
    ) -> Self {
        info!(
            "Opening live session {} with host {}",
            scheduled.id,
            counterparty.display_name()
        );

        let session = Self {
            scheduled,
            state: Arc::new(Mutex::new(LiveSessionState::with_media(
                config.start_muted,
                config.start_video_on,
            ))),
            counterparty,
            capture,
            monitor,
            ended: Arc::new(AtomicBool::new(false)),
            tasks: Mutex::new(Vec::new()),
            capture_stream: Arc::new(Mutex::new(None)),
        };

        let state = Arc::clone(&session.state);
        let ended = Arc::clone(&session.ended);
        let tick_interval = config.tick_interval;
        let ticker_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_interval);
            // the first tick fires immediately; counters start at zero
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if ended.load(Ordering::SeqCst) {
                    break;
                }
                state.lock().await.tick();
            }
        });

        let state = Arc::clone(&session.state);
        let ended = Arc::clone(&session.ended);
        let counterparty = Arc::clone(&session.counterparty);
        let session_id = session.scheduled.id.clone();
        let join_task = tokio::spawn(async move {
            counterparty.wait_for_join().await;
            if ended.load(Ordering::SeqCst) {
                return;
            }
            let mut state = state.lock().await;
            if state.begin_call() {
                state.push_message(ChatRole::Host, counterparty.greeting());
                info!(
                    "Host {} joined session {}",
                    counterparty.display_name(),
                    session_id
                );
            }
        });

        {
            let mut tasks = session.tasks.lock().await;
            tasks.push(ticker_task);
            tasks.push(join_task);
        }

        session
    }

    pub fn scheduled(&self) -> &ScheduledSession {
        &self.scheduled
    }

    /// Snapshot of the current machine state.
    pub async fn snapshot(&self) -> LiveSessionState {
        self.state.lock().await.clone()
    }

    /// Explicit join-now action exposed to the host role. Same transition
    /// as the auto-join timer.
    pub async fn join_now(&self) {
        if self.ended.load(Ordering::SeqCst) {
            return;
        }
        let mut state = self.state.lock().await;
        if state.begin_call() {
            state.push_message(ChatRole::Host, self.counterparty.greeting());
            info!(
                "Host {} joined session {}",
                self.counterparty.display_name(),
                self.scheduled.id
            );
        }
    }

    pub async fn toggle_mute(&self) {
        self.state.lock().await.toggle_mute();
    }

    pub async fn toggle_video(&self) {
        self.state.lock().await.toggle_video();
    }

    /// Request the capture resource and turn the share flag on. Refusal
    /// leaves the flag off with no error surfaced.
    pub async fn start_screen_share(&self) {
        if self.ended.load(Ordering::SeqCst) {
            return;
        }
        {
            let state = self.state.lock().await;
            if state.phase() != SessionPhase::Active || state.screen_sharing() {
                return;
            }
        }

        match self.capture.acquire().await {
            Ok(mut stream) => {
                let ended_signal = stream.take_ended_signal();
                *self.capture_stream.lock().await = Some(stream);
                self.state.lock().await.set_screen_sharing(true);

                // The stream can be stopped from a system control outside
                // the app at any time while sharing.
                if let Some(mut signal) = ended_signal {
                    let state = Arc::clone(&self.state);
                    let slot = Arc::clone(&self.capture_stream);
                    let watcher = tokio::spawn(async move {
                        if signal.recv().await.is_some() {
                            debug!("Screen share stopped outside the app");
                            release_capture(&slot, &state).await;
                        }
                    });
                    self.tasks.lock().await.push(watcher);
                }
            }
            Err(err) => {
                debug!("Screen capture not acquired: {err:#}");
            }
        }
    }

    /// Turn the share flag off and release the stream. Same cleanup path
    /// as external termination and session end.
    pub async fn stop_screen_share(&self) {
        release_capture(&self.capture_stream, &self.state).await;
    }

    /// Append a guest message and arm the counterparty's delayed reply.
    pub async fn send_message(&self, text: impl Into<String>) {
        if self.ended.load(Ordering::SeqCst) {
            return;
        }
        let text = text.into();
        self.state
            .lock()
            .await
            .push_message(ChatRole::Guest, text.clone());

        let state = Arc::clone(&self.state);
        let ended = Arc::clone(&self.ended);
        let counterparty = Arc::clone(&self.counterparty);
        let reply_task = tokio::spawn(async move {
            let reply = counterparty.compose_reply(&text).await;
            if !ended.load(Ordering::SeqCst) {
                state.lock().await.push_message(ChatRole::Host, reply);
            }
        });
        self.tasks.lock().await.push(reply_task);
    }

    /// End the session: abort every pending timer, release any capture,
    /// seal the state machine, and drop the booking from the monitor.
    /// Available from both the waiting room and the call; idempotent.
    pub async fn end(&self) {
        if self.ended.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut tasks = self.tasks.lock().await;
            for task in tasks.drain(..) {
                task.abort();
            }
        }

        release_capture(&self.capture_stream, &self.state).await;
        self.state.lock().await.end();
        self.monitor.remove_session(&self.scheduled.id).await;

        info!("Live session {} ended", self.scheduled.id);
    }
}

/// The one cleanup routine every share-release path converges on:
/// toggle-off, session end, and external termination. Releasing twice is
/// harmless because the slot is emptied on the first pass.
async fn release_capture(
    slot: &Mutex<Option<CaptureStream>>,
    state: &Mutex<LiveSessionState>,
) {
    if let Some(stream) = slot.lock().await.take() {
        stream.release();
    }
    state.lock().await.set_screen_sharing(false);
}
