use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookingRecord, BookingStore, CreateBooking};

/// Process-local store used when no persistence service is configured,
/// and by tests.
#[derive(Default)]
pub struct InMemoryBookingStore {
    bookings: RwLock<Vec<BookingRecord>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create(&self, booking: &CreateBooking) -> Result<BookingRecord> {
        let record = BookingRecord {
            id: format!("booking-{}", uuid::Uuid::new_v4()),
            user_name: booking.user_name.clone(),
            user_email: booking.user_email.clone(),
            service_id: booking.service_id.clone(),
            service_title: booking.service_title.clone(),
            booking_date: booking.booking_date.clone(),
            time_slot: booking.time_slot.clone(),
        };
        self.bookings.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_for(&self, user_email: &str) -> Result<Vec<BookingRecord>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| b.user_email == user_email)
            .cloned()
            .collect())
    }

    async fn cancel(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|b| b.id != booking_id);
        if bookings.len() == before {
            bail!("Booking {} not found", booking_id);
        }
        Ok(())
    }
}
