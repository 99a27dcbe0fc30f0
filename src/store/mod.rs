//! Booking persistence collaborator
//!
//! The hosted booking service is opaque: the core only depends on the
//! create / list-by-user / cancel contract over `BookingRecord`. The HTTP
//! client talks to the configured deployment; the in-memory store backs
//! local runs and tests.

mod http;
mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpBookingStore;
pub use memory::InMemoryBookingStore;

/// What the collaborator needs to persist a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    pub user_name: String,
    pub user_email: String,
    pub service_id: String,
    pub service_title: String,
    /// ISO calendar date, e.g. "2025-06-12"
    pub booking_date: String,
    pub time_slot: String,
}

/// A persisted booking as the collaborator reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub service_id: String,
    pub service_title: String,
    pub booking_date: String,
    pub time_slot: String,
}

/// Booking CRUD against the persistence collaborator.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(&self, booking: &CreateBooking) -> Result<BookingRecord>;

    async fn list_for(&self, user_email: &str) -> Result<Vec<BookingRecord>>;

    async fn cancel(&self, booking_id: &str) -> Result<()>;
}
