//! AI concierge collaborator
//!
//! Recommends catalog items for a free-text query via a hosted
//! generative-language API. The collaborator is best-effort: missing
//! credentials, network failures, and unexpected response shapes all
//! degrade to a static fallback so the chat surface never blocks.

mod client;

use async_trait::async_trait;

pub use client::GenerativeConcierge;

/// Shown whenever the recommendation collaborator cannot answer.
pub const OFFLINE_FALLBACK: &str = "AI is currently offline. Please browse the menu manually.";

#[async_trait]
pub trait Concierge: Send + Sync {
    /// Advice constrained to the supplied menu. Never fails outward.
    async fn recommend(&self, user_query: &str, menu_context: &str) -> String;
}
