//! Payout computation.
//!
//! Win amount = stake × rate, rounded half-up to whole currency units.
//! A missing or non-positive rate is a configuration gap and is raised,
//! never paid as zero.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::types::{BetType, EngineError, MatchOutcome, PayoutRates, WinDetermination};

/// Compute the amount paid on a winning bet.
pub fn compute_win_amount(
    bet_type: BetType,
    bet_amount: Decimal,
    payout_rates: &PayoutRates,
) -> Result<Decimal, EngineError> {
    if bet_amount <= Decimal::ZERO {
        return Err(EngineError::InvalidStake(bet_amount));
    }

    let rate = payout_rates
        .get(&bet_type)
        .ok_or(EngineError::ConfigurationGap { bet_type })?;
    if rate <= Decimal::ZERO {
        return Err(EngineError::InvalidRate { bet_type, rate });
    }

    let raw = bet_amount
        .checked_mul(rate)
        .ok_or(EngineError::PayoutOverflow {
            bet_type,
            amount: bet_amount,
            rate,
        })?;

    // Stakes are positive, so away-from-zero is half-up.
    let amount = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    debug!(bet_type = %bet_type, stake = %bet_amount, rate = %rate, amount = %amount, "Win amount computed");
    Ok(amount)
}

/// Turn a match outcome into a `WinDetermination`.
///
/// `Unsupported` outcomes are raised as `UnsupportedBetType` so that no
/// caller can book them as losses.
pub fn determine(
    outcome: &MatchOutcome,
    bet_type: BetType,
    bet_amount: Decimal,
    payout_rates: &PayoutRates,
) -> Result<WinDetermination, EngineError> {
    match outcome {
        MatchOutcome::Matched => {
            compute_win_amount(bet_type, bet_amount, payout_rates).map(WinDetermination::win)
        }
        MatchOutcome::NotMatched => Ok(WinDetermination::loss()),
        MatchOutcome::Unsupported(reason) => Err(EngineError::UnsupportedBetType {
            bet_type,
            reason: reason.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
