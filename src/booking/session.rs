use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A confirmed, time-bound booking. Single-use: removed from the active
/// collection once its live session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub id: String,
    pub service_id: String,
    /// Denormalized for display so the session survives catalog edits
    pub service_title: String,
    pub date: NaiveDate,
    /// 12-hour token such as "02:30 PM"
    pub time_slot: String,
    pub host_name: String,
    pub host_image: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_bio: String,
}

static SESSION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generation-time based session identifier. The sequence suffix keeps
/// ids distinct when two bookings land in the same millisecond.
pub fn next_session_id() -> String {
    let seq = SESSION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("session-{}-{}", Utc::now().timestamp_millis(), seq)
}
