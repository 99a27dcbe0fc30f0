// Integration tests for the live session state machine
//
// These tests drive a session from the waiting room through the call to
// the end, with a fast-forwarded simulated host and tick interval so the
// suite stays quick.

use chrono::{NaiveDate, NaiveDateTime};
use daymaker2day::{
    ActivityMonitor, Catalog, ChatRole, LiveSession, LiveSessionConfig, ManualClock,
    ScheduledSession, SessionPhase, SimulatedCapture, SimulatedHost,
};
use std::sync::Arc;
use std::time::Duration;

fn scheduled(id: &str) -> ScheduledSession {
    ScheduledSession {
        id: id.to_string(),
        service_id: "hc2".to_string(),
        service_title: "Daymaker Inbox Tidy".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
        time_slot: "02:00 PM".to_string(),
        host_name: "Jordan".to_string(),
        host_image: "jordan.png".to_string(),
        customer_name: "Alex Voyager".to_string(),
        customer_email: "alex@future.net".to_string(),
        customer_bio: String::new(),
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 12)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap()
}

async fn monitor_with(session: &ScheduledSession) -> ActivityMonitor {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let clock = Arc::new(ManualClock::starting_at(now()));
    let monitor = ActivityMonitor::new(catalog, clock as Arc<dyn daymaker2day::Clock>);
    monitor.add_session(session.clone()).await;
    monitor
}

fn fast_config() -> LiveSessionConfig {
    LiveSessionConfig {
        tick_interval: Duration::from_millis(10),
        ..LiveSessionConfig::default()
    }
}

fn fast_host(connect_ms: u64) -> Arc<SimulatedHost> {
    Arc::new(SimulatedHost::with_delays(
        "Jordan",
        Duration::from_millis(connect_ms),
        Duration::from_millis(20),
    ))
}

#[tokio::test]
async fn host_auto_join_moves_waiting_to_active_with_greeting() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(50),
        capture,
        fast_config(),
    )
    .await;

    let state = session.snapshot().await;
    assert_eq!(state.phase(), SessionPhase::Waiting);
    assert!(!state.host_joined());

    tokio::time::sleep(Duration::from_millis(150)).await;

    let state = session.snapshot().await;
    assert_eq!(state.phase(), SessionPhase::Active);
    assert!(state.host_joined());
    assert_eq!(state.transcript().len(), 1);
    assert_eq!(state.transcript()[0].role, ChatRole::Host);
    assert!(state.transcript()[0].text.contains("Ready when you are"));

    session.end().await;
}

#[tokio::test]
async fn waiting_counter_ticks_until_join() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    // Host never arrives on its own within the test
    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        capture,
        fast_config(),
    )
    .await;

    tokio::time::sleep(Duration::from_millis(200)).await;

    let state = session.snapshot().await;
    assert_eq!(state.phase(), SessionPhase::Waiting);
    assert!(state.waiting_secs() >= 5, "waited {}", state.waiting_secs());
    assert_eq!(state.active_secs(), 0);

    session.end().await;
}

#[tokio::test]
async fn join_now_starts_the_call_counter_at_zero() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        capture,
        fast_config(),
    )
    .await;

    session.join_now().await;
    let state = session.snapshot().await;
    assert_eq!(state.phase(), SessionPhase::Active);
    assert_eq!(state.active_secs(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let state = session.snapshot().await;
    assert!(state.active_secs() >= 5);

    session.end().await;
}

#[tokio::test]
async fn saved_preferences_seed_media_defaults() {
    use daymaker2day::prefs::{PREF_MUTED, PREF_VIDEO_ON};
    use daymaker2day::{InMemoryPreferences, PreferenceStore};

    let prefs = InMemoryPreferences::new();
    prefs.set(PREF_MUTED, "true");
    prefs.set(PREF_VIDEO_ON, "false");

    let mut config = LiveSessionConfig::with_preferences(&prefs);
    config.tick_interval = Duration::from_millis(10);

    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(scheduled, monitor, fast_host(60_000), capture, config).await;

    let state = session.snapshot().await;
    assert!(state.muted());
    assert!(!state.video_on());

    session.end().await;
}

#[tokio::test]
async fn media_toggles_only_apply_in_the_call() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        capture,
        fast_config(),
    )
    .await;

    // Still in the waiting room: toggles are inert
    session.toggle_mute().await;
    let state = session.snapshot().await;
    assert!(!state.muted());

    session.join_now().await;
    session.toggle_mute().await;
    session.toggle_video().await;
    let state = session.snapshot().await;
    assert!(state.muted());
    assert!(!state.video_on());

    session.end().await;
}

#[tokio::test]
async fn screen_share_refusal_is_a_silent_noop() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::denying());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        Arc::clone(&capture) as Arc<dyn daymaker2day::ScreenCapture>,
        fast_config(),
    )
    .await;

    session.join_now().await;
    session.start_screen_share().await;

    let state = session.snapshot().await;
    assert!(!state.screen_sharing());
    assert_eq!(capture.release_count(), 0);

    session.end().await;
}

#[tokio::test]
async fn external_stop_releases_the_stream_exactly_once() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        Arc::clone(&capture) as Arc<dyn daymaker2day::ScreenCapture>,
        fast_config(),
    )
    .await;

    session.join_now().await;
    session.start_screen_share().await;
    assert!(session.snapshot().await.screen_sharing());

    // The user stops sharing from a system control outside the app
    capture.stop_from_system().await;
    tokio::time::sleep(Duration::from_millis(50)).await;

    let state = session.snapshot().await;
    assert!(!state.screen_sharing());
    assert_eq!(capture.release_count(), 1);

    // Toggling off again must not double-release
    session.stop_screen_share().await;
    assert_eq!(capture.release_count(), 1);

    session.end().await;
    assert_eq!(capture.release_count(), 1);
}

#[tokio::test]
async fn guest_message_gets_a_delayed_host_reply() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        capture,
        fast_config(),
    )
    .await;

    session.join_now().await;
    session.send_message("Can you help me sort my inbox?").await;

    let state = session.snapshot().await;
    assert_eq!(state.transcript().len(), 2); // greeting + guest message
    assert_eq!(state.transcript()[1].role, ChatRole::Guest);

    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = session.snapshot().await;
    assert_eq!(state.transcript().len(), 3);
    assert_eq!(state.transcript()[2].role, ChatRole::Host);

    session.end().await;
}

#[tokio::test]
async fn end_cancels_pending_timers_and_freezes_state() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        capture,
        fast_config(),
    )
    .await;

    session.join_now().await;
    session.send_message("hello?").await;
    session.end().await;

    let frozen = session.snapshot().await;
    assert_eq!(frozen.phase(), SessionPhase::Ended);

    // Let the tick interval and the pending auto-reply elapse
    tokio::time::sleep(Duration::from_millis(150)).await;

    let state = session.snapshot().await;
    assert_eq!(state.active_secs(), frozen.active_secs());
    assert_eq!(state.transcript().len(), frozen.transcript().len());
}

#[tokio::test]
async fn end_releases_capture_and_removes_the_booking() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor.clone(),
        fast_host(60_000),
        Arc::clone(&capture) as Arc<dyn daymaker2day::ScreenCapture>,
        fast_config(),
    )
    .await;

    session.join_now().await;
    session.start_screen_share().await;
    session.end().await;

    assert_eq!(capture.release_count(), 1);
    assert!(monitor.sessions().await.is_empty());
    assert!(monitor.current().is_none());

    // end is idempotent
    session.end().await;
    assert_eq!(capture.release_count(), 1);
}

#[tokio::test]
async fn ended_session_ignores_every_further_action() {
    let scheduled = scheduled("s1");
    let monitor = monitor_with(&scheduled).await;
    let capture = Arc::new(SimulatedCapture::granting());

    let session = LiveSession::open(
        scheduled,
        monitor,
        fast_host(60_000),
        Arc::clone(&capture) as Arc<dyn daymaker2day::ScreenCapture>,
        fast_config(),
    )
    .await;

    // End straight from the waiting room
    session.end().await;

    session.join_now().await;
    session.start_screen_share().await;
    session.send_message("anyone there?").await;
    session.toggle_mute().await;

    let state = session.snapshot().await;
    assert_eq!(state.phase(), SessionPhase::Ended);
    assert!(state.transcript().is_empty());
    assert!(!state.muted());
    assert_eq!(capture.release_count(), 0);
}
