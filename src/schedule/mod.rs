//! Session activity windows
//!
//! This module decides when a confirmed booking is joinable:
//! - `window` is the pure evaluator mapping (session, catalog, now) to a
//!   before/in/after classification
//! - `monitor` owns the scheduled-session collection, polls it on a fixed
//!   cadence, and publishes the currently joinable session

mod monitor;
mod window;

pub use monitor::{ActivityMonitor, DEFAULT_POLL_INTERVAL};
pub use window::{
    classify_session, parse_time_slot, ActivityWindow, WindowPosition,
    DEFAULT_DURATION_MINUTES, EARLY_JOIN_GRACE_MINUTES,
};
