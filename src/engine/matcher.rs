//! Winner determination.
//!
//! Matches a bet against a declared result. Session bets (single digit and
//! the pana family) settle against one `DeclaredResult`; jodi and sangam
//! bets need both sessions of the day and settle against `SessionResults`.
//!
//! Matching is plain string comparison. The bet number's format is assumed
//! to have been checked at stake time; a malformed number simply does not
//! match.

use tracing::debug;

use super::validator::{parse_sangam, SangamToken};
use crate::types::{
    BetType, DeclaredResult, GameVariant, MainBetType, MatchOutcome, SessionResults,
    StarlineBetType,
};

/// Match a bet against a single session (or Starline draw) result.
pub fn is_winning_bet(bet_type: BetType, bet_number: &str, result: &DeclaredResult) -> MatchOutcome {
    if bet_type.variant() != result.variant() {
        return MatchOutcome::Unsupported(format!(
            "{} bet type {bet_type} cannot settle against a {} result",
            bet_type.variant(),
            result.variant(),
        ));
    }

    let outcome = match bet_type {
        BetType::Main(MainBetType::Single) | BetType::Starline(StarlineBetType::SingleDigit) => {
            MatchOutcome::from_bool(digit_matches(result.digit(), bet_number))
        }
        BetType::Main(MainBetType::SinglePanna | MainBetType::DoublePanna | MainBetType::TriplePanna)
        | BetType::Starline(
            StarlineBetType::SinglePana | StarlineBetType::DoublePana | StarlineBetType::TriplePana,
        ) => MatchOutcome::from_bool(!bet_number.is_empty() && result.pana() == bet_number),
        BetType::Main(MainBetType::Jodi) => MatchOutcome::Unsupported(
            "jodi needs both open and close session results".to_string(),
        ),
        BetType::Main(MainBetType::HalfSangam | MainBetType::FullSangam) => {
            MatchOutcome::Unsupported(format!(
                "{bet_type} needs both open and close session results"
            ))
        }
    };

    debug!(bet_type = %bet_type, bet_number, result = %result, outcome = ?outcome, "Bet matched");
    outcome
}

/// Match a day-level bet (jodi, half sangam, full sangam) against the open
/// and close results of one main-game day.
pub fn is_winning_day_bet(bet_type: BetType, bet_number: &str, day: &SessionResults) -> MatchOutcome {
    let main_type = match bet_type {
        BetType::Main(t) => t,
        BetType::Starline(_) => {
            return MatchOutcome::Unsupported(format!(
                "starline bet type {bet_type} cannot settle against {} session results",
                GameVariant::Main,
            ));
        }
    };

    let outcome = match main_type {
        MainBetType::Jodi => {
            let bet = bet_number.trim();
            MatchOutcome::from_bool(!bet.is_empty() && bet == day.jodi())
        }
        MainBetType::HalfSangam | MainBetType::FullSangam => {
            match parse_sangam(main_type, bet_number.trim()) {
                Some(token) => MatchOutcome::from_bool(sangam_matches(&token, day)),
                None => MatchOutcome::NotMatched,
            }
        }
        MainBetType::Single
        | MainBetType::SinglePanna
        | MainBetType::DoublePanna
        | MainBetType::TriplePanna => MatchOutcome::Unsupported(format!(
            "{bet_type} is a session bet; settle it against the open or close result"
        )),
    };

    debug!(bet_type = %bet_type, bet_number, day = %day, outcome = ?outcome, "Day bet matched");
    outcome
}

/// Both operands are trimmed; no numeric coercion, so "07" != "7".
fn digit_matches(declared: &str, bet_number: &str) -> bool {
    let bet = bet_number.trim();
    !bet.is_empty() && declared.trim() == bet
}

fn sangam_matches(token: &SangamToken<'_>, day: &SessionResults) -> bool {
    match token {
        SangamToken::OpenPanaCloseDigit { pana, digit } => {
            day.open.pana == *pana && day.close.digit.trim() == *digit
        }
        SangamToken::OpenDigitClosePana { digit, pana } => {
            day.open.digit.trim() == *digit && day.close.pana == *pana
        }
        SangamToken::Full { open, close } => day.open.pana == *open && day.close.pana == *close,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
