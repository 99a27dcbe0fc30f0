//! Booking wizard and confirmed sessions
//!
//! `BookingDraft` accumulates through the wizard (service → schedule →
//! payment → delivery for gifts → confirm) and converts into a
//! `ScheduledSession` on finalization.

mod draft;
mod processor;
mod profile;
mod session;

pub use draft::{
    BookingDraft, BookingKind, BookingStep, GiftDeliveryMethod, PaymentMethod, TIME_SLOTS,
};
pub use processor::{PaymentProcessor, PaymentReceipt, SimulatedProcessor};
pub use profile::{history_from_records, BookingHistoryItem, BookingStatus, UserProfile};
pub use session::{next_session_id, ScheduledSession};
