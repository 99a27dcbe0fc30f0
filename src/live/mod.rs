//! Live session lifecycle
//!
//! This module provides the `LiveSession` driver that manages:
//! - The waiting-room → active-call → ended state machine
//! - Waiting and call second counters
//! - Local media toggles and the screen-capture resource
//! - The ephemeral chat transcript with the simulated host

mod capture;
mod counterparty;
mod session;
mod state;

pub use capture::{CaptureStream, ScreenCapture, SimulatedCapture};
pub use counterparty::{Counterparty, SimulatedHost};
pub use session::{LiveSession, LiveSessionConfig};
pub use state::{ChatMessage, ChatRole, LiveSessionState, SessionPhase};
