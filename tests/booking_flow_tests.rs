// End-to-end booking flow: wizard → scheduled session → activity monitor

use chrono::{NaiveDate, NaiveDateTime};
use daymaker2day::booking::history_from_records;
use daymaker2day::{
    ActivityMonitor, BookingDraft, BookingKind, BookingStatus, Catalog, ClassType,
    GiftDeliveryMethod, ManualClock, PaymentMethod, PaymentProcessor, SimulatedProcessor,
    TIME_SLOTS,
};
use daymaker2day::{BookingRecord, BookingStore, CreateBooking, InMemoryBookingStore};
use std::sync::Arc;
use std::time::Duration;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    today().and_hms_opt(h, m, 0).unwrap()
}

#[tokio::test]
async fn booked_half_session_is_joinable_for_grace_plus_duration() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    // "Now" is 01:59 PM; the booked slot is one minute out
    let clock = Arc::new(ManualClock::starting_at(at(13, 59)));
    let monitor = ActivityMonitor::new(
        Arc::clone(&catalog),
        Arc::clone(&clock) as Arc<dyn daymaker2day::Clock>,
    );

    let mut draft = BookingDraft::new(BookingKind::ForSelf);
    draft.select_service("hc2");
    draft.select_slot(today(), "02:00 PM");
    draft.select_payment(PaymentMethod::Stripe);
    draft.set_contact("Alex Voyager", "alex@future.net");

    let session = draft.finalize(&catalog, "Jordan", "jordan.png").unwrap();
    let session_id = session.id.clone();
    monitor.add_session(session).await;

    // Joinable within three minutes of booking (grace period already open)
    clock.set(at(14, 2));
    monitor.reevaluate().await;
    assert_eq!(monitor.current().map(|s| s.id), Some(session_id.clone()));

    // Still joinable right at the end of the 25-minute session
    clock.set(at(14, 25));
    monitor.reevaluate().await;
    assert_eq!(monitor.current().map(|s| s.id), Some(session_id));

    // More than 2 + 25 minutes after "now": gone
    clock.set(at(14, 26));
    monitor.reevaluate().await;
    assert!(monitor.current().is_none());
}

#[tokio::test]
async fn gift_wizard_passes_through_delivery() {
    let catalog = Catalog::builtin().unwrap();

    let mut draft = BookingDraft::new(BookingKind::Gift);
    draft.select_service("fc25");
    draft.select_slot(today(), TIME_SLOTS[0].to_string());
    draft.select_payment(PaymentMethod::ApplePay);
    draft.select_delivery(GiftDeliveryMethod::CopyLink);
    draft.set_contact("Sam", "sam@future.net");

    assert!(draft.ready_to_finalize());
    let session = draft.finalize(&catalog, "Jordan", "jordan.png").unwrap();
    assert_eq!(session.service_title, "Daymaker Pet Party");
    assert_eq!(session.time_slot, "09:00 AM");
}

#[tokio::test]
async fn simulated_processor_settles_the_payment_step() {
    let processor = SimulatedProcessor::with_delay(Duration::from_millis(10));

    let receipt = processor
        .charge(PaymentMethod::GooglePay, ClassType::Half.price_cents())
        .await
        .unwrap();

    assert_eq!(receipt.method, PaymentMethod::GooglePay);
    assert_eq!(receipt.amount_cents, 2900);
    assert!(receipt.reference.starts_with("pay-"));
}

#[tokio::test]
async fn history_splits_upcoming_and_completed() {
    let catalog = Catalog::builtin().unwrap();
    let store = InMemoryBookingStore::new();

    for (service_id, slot) in [("hc2", "09:00 AM"), ("fc8", "03:00 PM")] {
        store
            .create(&CreateBooking {
                user_name: "Alex Voyager".to_string(),
                user_email: "alex@future.net".to_string(),
                service_id: service_id.to_string(),
                service_title: catalog.offering(service_id).unwrap().title.clone(),
                booking_date: "2025-06-12".to_string(),
                time_slot: slot.to_string(),
            })
            .await
            .unwrap();
    }

    let records: Vec<BookingRecord> = store.list_for("alex@future.net").await.unwrap();
    // Noon sits after the morning half class and before the afternoon one
    let history = history_from_records(&records, &catalog, at(12, 0));

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, BookingStatus::Completed);
    assert_eq!(history[1].status, BookingStatus::Upcoming);
    assert_eq!(history[0].date_str, "2025-06-12 @ 09:00 AM");
}

#[tokio::test]
async fn repeated_submission_double_books() {
    // Submission has no idempotency key; a second submit creates a second
    // session. Duplicate prevention belongs to the persistence
    // collaborator, not this core.
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let clock = Arc::new(ManualClock::starting_at(at(13, 59)));
    let monitor = ActivityMonitor::new(
        Arc::clone(&catalog),
        Arc::clone(&clock) as Arc<dyn daymaker2day::Clock>,
    );

    let mut draft = BookingDraft::new(BookingKind::ForSelf);
    draft.select_service("hc2");
    draft.select_slot(today(), "02:00 PM");

    let first = draft.finalize(&catalog, "Jordan", "jordan.png").unwrap();
    let second = draft.finalize(&catalog, "Jordan", "jordan.png").unwrap();
    monitor.add_session(first.clone()).await;
    monitor.add_session(second).await;

    assert_eq!(monitor.sessions().await.len(), 2);
    // First stored still wins the joinable slot
    assert_eq!(monitor.current().map(|s| s.id), Some(first.id));
}
