pub mod booking;
pub mod catalog;
pub mod clock;
pub mod concierge;
pub mod config;
pub mod http;
pub mod live;
pub mod prefs;
pub mod schedule;
pub mod store;

pub use booking::{
    BookingDraft, BookingHistoryItem, BookingKind, BookingStatus, BookingStep, GiftDeliveryMethod,
    PaymentMethod, PaymentProcessor, PaymentReceipt, ScheduledSession, SimulatedProcessor,
    UserProfile, TIME_SLOTS,
};
pub use catalog::{Catalog, CatalogFilter, ClassType, ServiceOffering};
pub use clock::{Clock, ManualClock, SystemClock};
pub use concierge::{Concierge, GenerativeConcierge, OFFLINE_FALLBACK};
pub use config::Config;
pub use http::{create_router, AppState};
pub use live::{
    ChatMessage, ChatRole, Counterparty, LiveSession, LiveSessionConfig, LiveSessionState,
    ScreenCapture, SessionPhase, SimulatedCapture, SimulatedHost,
};
pub use prefs::{InMemoryPreferences, PreferenceStore};
pub use schedule::{ActivityMonitor, ActivityWindow, WindowPosition};
pub use store::{BookingRecord, BookingStore, CreateBooking, HttpBookingStore, InMemoryBookingStore};
