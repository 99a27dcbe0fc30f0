use chrono::{DateTime, Utc};
use serde::Serialize;

/// Live-session lifecycle. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    Waiting,
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Host,
    Guest,
}

/// One entry of the ephemeral session transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// The state-machine value for one in-progress session.
///
/// All mutators are guarded on the phase: once `Ended`, every mutation is
/// ignored, so a stale timer callback firing after teardown cannot change
/// anything.
#[derive(Debug, Clone)]
pub struct LiveSessionState {
    phase: SessionPhase,
    waiting_secs: u64,
    active_secs: u64,
    muted: bool,
    video_on: bool,
    screen_sharing: bool,
    host_joined: bool,
    transcript: Vec<ChatMessage>,
}

impl LiveSessionState {
    pub fn new() -> Self {
        Self::with_media(false, true)
    }

    /// Waiting-room state with saved media defaults applied.
    pub fn with_media(muted: bool, video_on: bool) -> Self {
        Self {
            phase: SessionPhase::Waiting,
            waiting_secs: 0,
            active_secs: 0,
            muted,
            video_on,
            screen_sharing: false,
            host_joined: false,
            transcript: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn waiting_secs(&self) -> u64 {
        self.waiting_secs
    }

    pub fn active_secs(&self) -> u64 {
        self.active_secs
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn video_on(&self) -> bool {
        self.video_on
    }

    pub fn screen_sharing(&self) -> bool {
        self.screen_sharing
    }

    pub fn host_joined(&self) -> bool {
        self.host_joined
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// One-second heartbeat. Counts waiting time in `Waiting`, call time
    /// in `Active`, nothing after `Ended`.
    pub fn tick(&mut self) {
        match self.phase {
            SessionPhase::Waiting => self.waiting_secs += 1,
            SessionPhase::Active => self.active_secs += 1,
            SessionPhase::Ended => {}
        }
    }

    /// `Waiting → Active`: the host connected (auto-join timer or an
    /// explicit join-now action). Returns whether the transition fired.
    pub fn begin_call(&mut self) -> bool {
        if self.phase != SessionPhase::Waiting {
            return false;
        }
        self.phase = SessionPhase::Active;
        self.host_joined = true;
        self.active_secs = 0;
        true
    }

    pub fn toggle_mute(&mut self) {
        if self.phase == SessionPhase::Active {
            self.muted = !self.muted;
        }
    }

    pub fn toggle_video(&mut self) {
        if self.phase == SessionPhase::Active {
            self.video_on = !self.video_on;
        }
    }

    /// Turning the share flag on is only meaningful in `Active`; turning
    /// it off is part of cleanup and allowed until the session ends.
    pub fn set_screen_sharing(&mut self, on: bool) {
        match self.phase {
            SessionPhase::Ended => {}
            SessionPhase::Active => self.screen_sharing = on,
            SessionPhase::Waiting => {
                if !on {
                    self.screen_sharing = false;
                }
            }
        }
    }

    /// Append to the transcript. Ignored once the session has ended.
    pub fn push_message(&mut self, role: ChatRole, text: impl Into<String>) {
        if self.phase == SessionPhase::Ended {
            return;
        }
        self.transcript.push(ChatMessage::new(role, text));
    }

    /// Terminal transition, reachable from both `Waiting` and `Active`.
    /// Clears the share flag so teardown converges on a clean state.
    pub fn end(&mut self) -> bool {
        if self.phase == SessionPhase::Ended {
            return false;
        }
        self.phase = SessionPhase::Ended;
        self.screen_sharing = false;
        true
    }
}

impl Default for LiveSessionState {
    fn default() -> Self {
        Self::new()
    }
}
