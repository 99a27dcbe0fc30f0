use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::booking::ScheduledSession;
use crate::catalog::Catalog;

/// Early-join allowance before the scheduled start.
pub const EARLY_JOIN_GRACE_MINUTES: i64 = 2;

/// Fallback session length when the offering is unknown or missing.
pub const DEFAULT_DURATION_MINUTES: i64 = 25;

/// Where "now" sits relative to a session's activity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowPosition {
    BeforeWindow,
    InWindow,
    AfterWindow,
}

/// Parse a 12-hour "H:MM AM|PM" token (zero-padded minutes).
///
/// Returns None for anything else; malformed slots must never take the
/// poll down, they just make the session unjoinable.
pub fn parse_time_slot(token: &str) -> Option<NaiveTime> {
    let mut parts = token.split_whitespace();
    let clock = parts.next()?;
    let marker = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let (hour_str, minute_str) = clock.split_once(':')?;
    if minute_str.len() != 2 {
        return None;
    }
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour24 = match marker {
        "AM" => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        "PM" => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        _ => return None,
    };

    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// The interval during which a scheduled session is joinable.
///
/// `start = scheduled − grace`, `end = scheduled + duration`, both
/// inclusive. The grace period is always shorter than the duration, so
/// `start < end` holds for every valid session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ActivityWindow {
    /// Compute the window for a date, time token and duration, or None
    /// when the token does not parse.
    pub fn for_slot(date: NaiveDate, time_slot: &str, duration_minutes: i64) -> Option<Self> {
        let time = parse_time_slot(time_slot)?;
        let scheduled = date.and_time(time);
        Some(Self {
            start: scheduled - Duration::minutes(EARLY_JOIN_GRACE_MINUTES),
            end: scheduled + Duration::minutes(duration_minutes),
        })
    }

    /// Compute the window for a session. A dangling service id falls back
    /// to the shortest duration rather than failing.
    pub fn for_session(session: &ScheduledSession, catalog: &Catalog) -> Option<Self> {
        let minutes = catalog
            .offering(&session.service_id)
            .map(|o| o.class_type.duration_minutes())
            .unwrap_or(DEFAULT_DURATION_MINUTES);
        Self::for_slot(session.date, &session.time_slot, minutes)
    }

    pub fn classify(&self, now: NaiveDateTime) -> WindowPosition {
        if now < self.start {
            WindowPosition::BeforeWindow
        } else if now > self.end {
            WindowPosition::AfterWindow
        } else {
            WindowPosition::InWindow
        }
    }

    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.classify(now) == WindowPosition::InWindow
    }
}

/// Classify a session against "now". Unparseable scheduling data reads as
/// not-yet-joinable instead of erroring.
pub fn classify_session(
    session: &ScheduledSession,
    catalog: &Catalog,
    now: NaiveDateTime,
) -> WindowPosition {
    match ActivityWindow::for_session(session, catalog) {
        Some(window) => window.classify(now),
        None => WindowPosition::BeforeWindow,
    }
}
