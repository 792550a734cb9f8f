//! Payout rate sources.
//!
//! Defines the `RateSource` trait, the seam between the engine and
//! whatever store holds the admin-configured game rates. The engine only
//! ever sees the resulting `PayoutRates` table.

use crate::config::RatesConfig;
use crate::types::{EngineError, PayoutRates};

/// Abstraction over the admin-configurable game-rates store.
#[cfg_attr(test, mockall::automock)]
pub trait RateSource: Send + Sync {
    /// Current payout table for every configured bet type.
    fn payout_rates(&self) -> Result<PayoutRates, EngineError>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

impl RateSource for RatesConfig {
    fn payout_rates(&self) -> Result<PayoutRates, EngineError> {
        self.to_payout_rates()
    }

    fn name(&self) -> &str {
        "config"
    }
}
