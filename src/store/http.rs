use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use super::{BookingRecord, BookingStore, CreateBooking};

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: BookingRecord,
}

#[derive(Debug, Deserialize)]
struct BookingListEnvelope {
    bookings: Vec<BookingRecord>,
}

/// Client for the hosted booking service.
pub struct HttpBookingStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBookingStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl BookingStore for HttpBookingStore {
    async fn create(&self, booking: &CreateBooking) -> Result<BookingRecord> {
        let response = self
            .client
            .post(self.url("/bookings"))
            .json(booking)
            .send()
            .await
            .context("Booking service unreachable")?;

        let status = response.status();
        if !status.is_success() {
            warn!("Booking service rejected create: {}", status);
            bail!("Booking service returned {}", status);
        }

        let envelope: BookingEnvelope = response
            .json()
            .await
            .context("Unexpected booking service response shape")?;
        Ok(envelope.booking)
    }

    async fn list_for(&self, user_email: &str) -> Result<Vec<BookingRecord>> {
        let response = self
            .client
            .get(self.url("/bookings"))
            .query(&[("user_email", user_email)])
            .send()
            .await
            .context("Booking service unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Booking service returned {}", status);
        }

        let envelope: BookingListEnvelope = response
            .json()
            .await
            .context("Unexpected booking service response shape")?;
        Ok(envelope.bookings)
    }

    async fn cancel(&self, booking_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/bookings/{}", booking_id)))
            .send()
            .await
            .context("Booking service unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Booking service returned {}", status);
        }
        Ok(())
    }
}
