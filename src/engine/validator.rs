//! Bet number format validation.
//!
//! Runs at stake time, before a bet is accepted. This is the one place the
//! per-type format rules live; matching at settlement time never re-checks
//! them.

use tracing::debug;

use crate::types::{BetType, MainBetType, PanaKind, StarlineBetType, ValidationResult};

/// Separator between the parts of a sangam token (`123-4`, `123-456`).
pub const SANGAM_SEPARATOR: char = '-';

/// Parsed sangam bet number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SangamToken<'a> {
    /// Half sangam staked as open pana + close digit (`123-4`).
    OpenPanaCloseDigit { pana: &'a str, digit: &'a str },
    /// Half sangam staked as open digit + close pana (`4-123`).
    OpenDigitClosePana { digit: &'a str, pana: &'a str },
    /// Full sangam: open pana + close pana (`123-456`).
    Full { open: &'a str, close: &'a str },
}

/// True iff `s` is exactly `len` ASCII decimal digits.
pub fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Classify a 3-digit number by digit repetition.
/// Returns `None` if `number` is not exactly three decimal digits.
pub fn classify_pana(number: &str) -> Option<PanaKind> {
    if !is_digits(number, 3) {
        return None;
    }
    let d = number.as_bytes();
    let kind = if d[0] == d[1] && d[1] == d[2] {
        PanaKind::Triple
    } else if d[0] == d[1] || d[1] == d[2] || d[0] == d[2] {
        PanaKind::Double
    } else {
        PanaKind::Single
    };
    Some(kind)
}

/// Split a sangam bet number into its parts.
pub fn parse_sangam(bet_type: MainBetType, number: &str) -> Option<SangamToken<'_>> {
    let (left, right) = number.split_once(SANGAM_SEPARATOR)?;
    match bet_type {
        MainBetType::HalfSangam if is_digits(left, 3) && is_digits(right, 1) => {
            Some(SangamToken::OpenPanaCloseDigit { pana: left, digit: right })
        }
        MainBetType::HalfSangam if is_digits(left, 1) && is_digits(right, 3) => {
            Some(SangamToken::OpenDigitClosePana { digit: left, pana: right })
        }
        MainBetType::FullSangam if is_digits(left, 3) && is_digits(right, 3) => {
            Some(SangamToken::Full { open: left, close: right })
        }
        _ => None,
    }
}

/// Validate a bet number against the format its bet type requires.
pub fn validate_bet_number_format(bet_type: BetType, bet_number: &str) -> ValidationResult {
    let result = match bet_type {
        BetType::Main(MainBetType::Single) | BetType::Starline(StarlineBetType::SingleDigit) => {
            digits_rule(bet_number, 1, "exactly one digit")
        }
        BetType::Main(MainBetType::Jodi) => digits_rule(bet_number, 2, "exactly two digits"),
        BetType::Main(MainBetType::SinglePanna) | BetType::Starline(StarlineBetType::SinglePana) => {
            digits_rule(bet_number, 3, "exactly three digits")
        }
        BetType::Main(MainBetType::DoublePanna)
        | BetType::Starline(StarlineBetType::DoublePana)
        | BetType::Main(MainBetType::TriplePanna)
        | BetType::Starline(StarlineBetType::TriplePana) => pana_rule(bet_type, bet_number),
        BetType::Main(t @ MainBetType::HalfSangam) => {
            sangam_rule(t, bet_number, "open pana and close digit (123-4) or open digit and close pana (4-123)")
        }
        BetType::Main(t @ MainBetType::FullSangam) => {
            sangam_rule(t, bet_number, "open pana and close pana (123-456)")
        }
    };

    if !result.valid {
        debug!(
            bet_type = %bet_type,
            bet_number,
            reason = result.reason.as_deref().unwrap_or(""),
            "Bet number rejected"
        );
    }
    result
}

fn digits_rule(bet_number: &str, len: usize, expected: &str) -> ValidationResult {
    if is_digits(bet_number, len) {
        ValidationResult::ok()
    } else {
        ValidationResult::invalid(format!("must be {expected}, got {bet_number:?}"))
    }
}

fn pana_rule(bet_type: BetType, bet_number: &str) -> ValidationResult {
    let Some(kind) = classify_pana(bet_number) else {
        return ValidationResult::invalid(format!("must be exactly three digits, got {bet_number:?}"));
    };
    match bet_type.required_pana_kind() {
        Some(required) if required != kind => ValidationResult::invalid(format!(
            "{bet_number} is a {kind} pana, {bet_type} needs a {required} pana"
        )),
        _ => ValidationResult::ok(),
    }
}

fn sangam_rule(bet_type: MainBetType, bet_number: &str, expected: &str) -> ValidationResult {
    if parse_sangam(bet_type, bet_number).is_some() {
        ValidationResult::ok()
    } else {
        ValidationResult::invalid(format!("must be {expected}, got {bet_number:?}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
