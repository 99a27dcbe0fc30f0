use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// An acquired screen-capture stream.
///
/// The stream is exclusively owned by the live session while sharing is
/// on, and must be released on exactly one of three paths: share toggled
/// off, session end, or external termination. `release` consumes the
/// handle; dropping an unreleased stream also counts as the one release.
pub struct CaptureStream {
    ended_rx: Option<mpsc::Receiver<()>>,
    released: Arc<AtomicBool>,
    release_count: Arc<AtomicUsize>,
}

impl CaptureStream {
    pub fn new(ended_rx: mpsc::Receiver<()>, release_count: Arc<AtomicUsize>) -> Self {
        Self {
            ended_rx: Some(ended_rx),
            released: Arc::new(AtomicBool::new(false)),
            release_count,
        }
    }

    /// Signal receiver that fires when the user stops sharing through a
    /// system control outside the app. Can only be taken once.
    pub fn take_ended_signal(&mut self) -> Option<mpsc::Receiver<()>> {
        self.ended_rx.take()
    }

    pub fn release(self) {
        self.mark_released();
    }

    fn mark_released(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.release_count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        self.mark_released();
    }
}

/// Acquisition of the screen-capture resource.
///
/// Refusal (the user or the environment declining the request) is a normal
/// outcome, surfaced as `Err` and handled as a silent no-op by the caller.
#[async_trait]
pub trait ScreenCapture: Send + Sync {
    async fn acquire(&self) -> Result<CaptureStream>;
}

/// In-process stand-in for a real capture backend.
///
/// Grants or declines deterministically, counts releases, and can emit the
/// "stopped from a system control" signal for the most recent stream.
pub struct SimulatedCapture {
    grant: bool,
    release_count: Arc<AtomicUsize>,
    external_stop: Mutex<Option<mpsc::Sender<()>>>,
}

impl SimulatedCapture {
    pub fn granting() -> Self {
        Self {
            grant: true,
            release_count: Arc::new(AtomicUsize::new(0)),
            external_stop: Mutex::new(None),
        }
    }

    pub fn denying() -> Self {
        Self {
            grant: false,
            release_count: Arc::new(AtomicUsize::new(0)),
            external_stop: Mutex::new(None),
        }
    }

    /// How many streams have been released so far.
    pub fn release_count(&self) -> usize {
        self.release_count.load(Ordering::SeqCst)
    }

    /// Simulate the user stopping the share via the system UI.
    pub async fn stop_from_system(&self) {
        let sender = self.external_stop.lock().unwrap().clone();
        if let Some(tx) = sender {
            let _ = tx.send(()).await;
        }
    }
}

#[async_trait]
impl ScreenCapture for SimulatedCapture {
    async fn acquire(&self) -> Result<CaptureStream> {
        if !self.grant {
            bail!("Screen capture request declined");
        }
        let (tx, rx) = mpsc::channel(1);
        *self.external_stop.lock().unwrap() = Some(tx);
        Ok(CaptureStream::new(rx, Arc::clone(&self.release_count)))
    }
}
