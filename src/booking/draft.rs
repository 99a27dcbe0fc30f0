use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::profile::UserProfile;
use super::session::{next_session_id, ScheduledSession};
use crate::catalog::Catalog;

/// Bookable time-of-day tokens offered by the calendar step.
pub const TIME_SLOTS: &[&str] = &[
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "01:00 PM", "01:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM",
    "04:00 PM", "04:30 PM", "05:00 PM", "05:30 PM",
];

/// Whether the booking is for the buyer or a gift for someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    ForSelf,
    Gift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    ApplePay,
    GooglePay,
    Stripe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftDeliveryMethod {
    Email,
    CopyLink,
    Share,
}

/// Wizard position. Delivery only exists on the gift path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStep {
    ServiceDetail,
    Schedule,
    Payment,
    Delivery,
    Confirm,
}

/// State accumulated while a user moves through the booking wizard.
///
/// Each completed step fills one field and advances the step pointer.
/// Going back never clears fields, so earlier answers survive revision.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    step: BookingStep,
    kind: BookingKind,
    pub service_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub delivery_method: Option<GiftDeliveryMethod>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_bio: String,
}

impl BookingDraft {
    pub fn new(kind: BookingKind) -> Self {
        Self {
            step: BookingStep::ServiceDetail,
            kind,
            service_id: None,
            date: None,
            time_slot: None,
            payment_method: None,
            delivery_method: None,
            contact_name: String::new(),
            contact_email: String::new(),
            contact_bio: String::new(),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn kind(&self) -> BookingKind {
        self.kind
    }

    pub fn select_service(&mut self, service_id: impl Into<String>) {
        self.service_id = Some(service_id.into());
        self.step = BookingStep::Schedule;
    }

    pub fn select_slot(&mut self, date: NaiveDate, time_slot: impl Into<String>) {
        self.date = Some(date);
        self.time_slot = Some(time_slot.into());
        self.step = BookingStep::Payment;
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
        self.step = match self.kind {
            BookingKind::Gift => BookingStep::Delivery,
            BookingKind::ForSelf => BookingStep::Confirm,
        };
    }

    pub fn select_delivery(&mut self, method: GiftDeliveryMethod) {
        self.delivery_method = Some(method);
        self.step = BookingStep::Confirm;
    }

    pub fn set_contact(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.contact_name = name.into();
        self.contact_email = email.into();
    }

    /// Prefill contact fields from a saved profile; the user can still
    /// revise them before submitting.
    pub fn prefill_from_profile(&mut self, profile: &UserProfile) {
        self.contact_name = profile.name.clone();
        self.contact_email = profile.email.clone();
        self.contact_bio = profile.bio.clone();
    }

    /// Move the step pointer back one step. Fields are retained.
    pub fn back(&mut self) {
        self.step = match self.step {
            BookingStep::ServiceDetail => BookingStep::ServiceDetail,
            BookingStep::Schedule => BookingStep::ServiceDetail,
            BookingStep::Payment => BookingStep::Schedule,
            BookingStep::Delivery => BookingStep::Payment,
            BookingStep::Confirm => match self.kind {
                BookingKind::Gift => BookingStep::Delivery,
                BookingKind::ForSelf => BookingStep::Payment,
            },
        };
    }

    pub fn ready_to_finalize(&self) -> bool {
        self.service_id.is_some() && self.date.is_some() && self.time_slot.is_some()
    }

    /// Convert the draft into a scheduled session, consuming nothing: the
    /// caller discards the draft after a successful submit. Contact fields
    /// are validated by the form layer, not here.
    pub fn finalize(
        &self,
        catalog: &Catalog,
        host_name: impl Into<String>,
        host_image: impl Into<String>,
    ) -> Result<ScheduledSession> {
        let (Some(service_id), Some(date), Some(time_slot)) =
            (&self.service_id, self.date, &self.time_slot)
        else {
            bail!("Booking draft is incomplete: service, date and time are required");
        };

        let service_title = catalog
            .offering(service_id)
            .map(|o| o.title.clone())
            .unwrap_or_else(|| service_id.clone());

        Ok(ScheduledSession {
            id: next_session_id(),
            service_id: service_id.clone(),
            service_title,
            date,
            time_slot: time_slot.clone(),
            host_name: host_name.into(),
            host_image: host_image.into(),
            customer_name: self.contact_name.clone(),
            customer_email: self.contact_email.clone(),
            customer_bio: self.contact_bio.clone(),
        })
    }
}
