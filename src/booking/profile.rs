use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::schedule::{ActivityWindow, WindowPosition, DEFAULT_DURATION_MINUTES};
use crate::store::BookingRecord;

/// Display profile attached to sessions booked by a returning visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub bio: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Completed,
    Upcoming,
    Cancelled,
}

/// One row of a user's booking history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingHistoryItem {
    pub id: String,
    pub service_title: String,
    pub date_str: String,
    pub status: BookingStatus,
}

/// Render stored bookings as a history view. A booking reads as completed
/// once its activity window has passed; cancelled bookings never appear
/// here because the collaborator deletes them.
pub fn history_from_records(
    records: &[BookingRecord],
    catalog: &Catalog,
    now: NaiveDateTime,
) -> Vec<BookingHistoryItem> {
    records
        .iter()
        .map(|record| {
            let minutes = catalog
                .offering(&record.service_id)
                .map(|o| o.class_type.duration_minutes())
                .unwrap_or(DEFAULT_DURATION_MINUTES);

            let position = record
                .booking_date
                .parse::<NaiveDate>()
                .ok()
                .and_then(|date| ActivityWindow::for_slot(date, &record.time_slot, minutes))
                .map(|window| window.classify(now))
                .unwrap_or(WindowPosition::BeforeWindow);

            let status = match position {
                WindowPosition::AfterWindow => BookingStatus::Completed,
                _ => BookingStatus::Upcoming,
            };

            BookingHistoryItem {
                id: record.id.clone(),
                service_title: record.service_title.clone(),
                date_str: format!("{} @ {}", record.booking_date, record.time_slot),
                status,
            }
        })
        .collect()
}
