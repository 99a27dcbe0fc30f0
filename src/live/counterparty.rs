use async_trait::async_trait;
use std::time::Duration;

/// The remote party of a live session.
///
/// In this system the host is simulated, but the state machine only talks
/// to this interface so a real transport can be substituted later.
#[async_trait]
pub trait Counterparty: Send + Sync {
    fn display_name(&self) -> &str;

    /// Resolves once the counterparty has connected. Drives the
    /// waiting-room → active transition.
    async fn wait_for_join(&self);

    /// First transcript entry, seeded when the counterparty joins.
    fn greeting(&self) -> String;

    /// Compose a reply to a guest message, including the counterparty's
    /// think delay.
    async fn compose_reply(&self, text: &str) -> String;
}

/// Scripted host used in place of a real second party.
pub struct SimulatedHost {
    name: String,
    connect_delay: Duration,
    reply_delay: Duration,
}

impl SimulatedHost {
    pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(1500);
    pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(2);

    pub fn new(name: impl Into<String>) -> Self {
        Self::with_delays(
            name,
            Self::DEFAULT_CONNECT_DELAY,
            Self::DEFAULT_REPLY_DELAY,
        )
    }

    pub fn with_delays(
        name: impl Into<String>,
        connect_delay: Duration,
        reply_delay: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            connect_delay,
            reply_delay,
        }
    }
}

#[async_trait]
impl Counterparty for SimulatedHost {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn wait_for_join(&self) {
        tokio::time::sleep(self.connect_delay).await;
    }

    fn greeting(&self) -> String {
        "Hey! I can see you. Ready when you are! 👋".to_string()
    }

    async fn compose_reply(&self, _text: &str) -> String {
        tokio::time::sleep(self.reply_delay).await;
        "Got it! Let me help you with that...".to_string()
    }
}
