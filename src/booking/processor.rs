use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use super::draft::PaymentMethod;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub reference: String,
    pub method: PaymentMethod,
    pub amount_cents: u32,
}

/// Settles the wizard's payment step.
///
/// The in-process stand-in below approves everything; a real gateway can
/// be substituted without touching the booking flow.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn charge(&self, method: PaymentMethod, amount_cents: u32) -> Result<PaymentReceipt>;
}

/// Approves every charge after a fixed processing delay.
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new() -> Self {
        Self::with_delay(Self::DEFAULT_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn charge(&self, method: PaymentMethod, amount_cents: u32) -> Result<PaymentReceipt> {
        tokio::time::sleep(self.delay).await;
        Ok(PaymentReceipt {
            reference: format!("pay-{}", uuid::Uuid::new_v4()),
            method,
            amount_cents,
        })
    }
}
