//! Settler — batch settlement of pending bets.
//!
//! Runs the match → payout sequence for every pending bet against a newly
//! declared result and tallies the outcome. A bet the engine cannot settle
//! is flagged for operator attention instead of being booked as a loss.
//! A stake that is not positive fails the bet whether or not it matched.
//! One bad bet never aborts the batch.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::matcher::{is_winning_bet, is_winning_day_bet};
use super::payout::determine;
use crate::types::{
    DeclaredResult, EngineError, MatchOutcome, PayoutRates, PendingBet, SessionResults,
    SettlementLine, SettlementReport, SettlementStatus,
};

pub struct Settler;

impl Settler {
    /// Settle bets against a single session or Starline result.
    pub fn settle(
        bets: &[PendingBet],
        result: &DeclaredResult,
        rates: &PayoutRates,
    ) -> SettlementReport {
        Self::run(bets, result.to_string(), rates, |bet| {
            is_winning_bet(bet.bet_type, &bet.bet_number, result)
        })
    }

    /// Settle jodi and sangam bets against both sessions of a day.
    pub fn settle_day(
        bets: &[PendingBet],
        day: &SessionResults,
        rates: &PayoutRates,
    ) -> SettlementReport {
        Self::run(bets, format!("[day] {day}"), rates, |bet| {
            is_winning_day_bet(bet.bet_type, &bet.bet_number, day)
        })
    }

    fn run<F>(bets: &[PendingBet], result: String, rates: &PayoutRates, matcher: F) -> SettlementReport
    where
        F: Fn(&PendingBet) -> MatchOutcome,
    {
        let mut report = SettlementReport {
            settlement_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            result,
            lines: Vec::with_capacity(bets.len()),
            winners: 0,
            losers: 0,
            flagged: 0,
            failed: 0,
            total_stake: Decimal::ZERO,
            total_payout: Decimal::ZERO,
        };

        for bet in bets {
            let status = Self::settle_one(bet, rates, &matcher);
            match &status {
                SettlementStatus::Settled { determination } if determination.is_winner => {
                    report.winners += 1;
                    report.total_payout += determination.win_amount;
                }
                SettlementStatus::Settled { .. } => report.losers += 1,
                SettlementStatus::Flagged { reason } => {
                    report.flagged += 1;
                    warn!(bet_id = %bet.id, bet_type = %bet.bet_type, reason = %reason, "Bet flagged: cannot settle");
                }
                SettlementStatus::Failed { error } => {
                    report.failed += 1;
                    warn!(bet_id = %bet.id, bet_type = %bet.bet_type, error = %error, "Bet settlement failed");
                }
            }
            // A rejected stake never reached the house.
            if bet.amount > Decimal::ZERO {
                report.total_stake += bet.amount;
            }
            report.lines.push(SettlementLine {
                bet_id: bet.id.clone(),
                bet_type: bet.bet_type,
                bet_number: bet.bet_number.clone(),
                amount: bet.amount,
                status,
            });
        }

        info!(
            settlement_id = %report.settlement_id,
            result = %report.result,
            bets = report.lines.len(),
            winners = report.winners,
            losers = report.losers,
            flagged = report.flagged,
            failed = report.failed,
            stake = %report.total_stake,
            payout = %report.total_payout,
            "Settlement complete"
        );

        report
    }

    fn settle_one<F>(bet: &PendingBet, rates: &PayoutRates, matcher: &F) -> SettlementStatus
    where
        F: Fn(&PendingBet) -> MatchOutcome,
    {
        if bet.amount <= Decimal::ZERO {
            return SettlementStatus::Failed {
                error: EngineError::InvalidStake(bet.amount).to_string(),
            };
        }

        match determine(&matcher(bet), bet.bet_type, bet.amount, rates) {
            Ok(determination) => SettlementStatus::Settled { determination },
            Err(EngineError::UnsupportedBetType { reason, .. }) => {
                SettlementStatus::Flagged { reason }
            }
            Err(e) => SettlementStatus::Failed { error: e.to_string() },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
