//! Result declaration.
//!
//! Builds validated `DeclaredResult`s from admin input. The digit of a pana
//! is its digit sum mod 10; main-game declarations may carry an explicitly
//! entered digit, which is checked against the pana when
//! `enforce_digit_sum` is on.

use serde::Deserialize;
use tracing::{info, warn};

use super::validator::is_digits;
use crate::types::{DeclaredResult, EngineError, MainResult, SessionResults, StarlineResult};

/// Digit of a pana: sum of its three digits mod 10.
pub fn derive_digit(pana: &str) -> Result<String, EngineError> {
    if !is_digits(pana, 3) {
        return Err(EngineError::InvalidResult(format!(
            "pana must be exactly three digits, got {pana:?}"
        )));
    }
    let sum: u32 = pana.bytes().map(|b| u32::from(b - b'0')).sum();
    Ok((sum % 10).to_string())
}

impl MainResult {
    /// Declare a session result from an admin-entered pana and digit.
    pub fn declare(pana: &str, digit: &str, enforce_digit_sum: bool) -> Result<Self, EngineError> {
        let pana = pana.trim();
        let digit = digit.trim();
        let expected = derive_digit(pana)?;

        if !is_digits(digit, 1) {
            return Err(EngineError::InvalidResult(format!(
                "digit must be exactly one digit, got {digit:?}"
            )));
        }

        if digit != expected {
            if enforce_digit_sum {
                return Err(EngineError::DigitMismatch {
                    pana: pana.to_string(),
                    digit: digit.to_string(),
                    expected,
                });
            }
            warn!(pana, digit, expected = %expected, "Declared digit disagrees with pana digit sum");
        }

        Ok(Self {
            pana: pana.to_string(),
            digit: digit.to_string(),
        })
    }

    /// Declare a session result, deriving the digit from the pana.
    pub fn from_pana(pana: &str) -> Result<Self, EngineError> {
        let pana = pana.trim();
        let digit = derive_digit(pana)?;
        Ok(Self {
            pana: pana.to_string(),
            digit,
        })
    }
}

impl StarlineResult {
    /// Declare a Starline draw. The digit is derived here so the matcher can
    /// treat it as given.
    pub fn declare(winning_number: &str) -> Result<Self, EngineError> {
        let winning_number = winning_number.trim();
        let digit = derive_digit(winning_number)?;
        Ok(Self {
            winning_number: winning_number.to_string(),
            digit,
        })
    }
}

impl SessionResults {
    pub fn from_panas(open: &str, close: &str) -> Result<Self, EngineError> {
        Ok(Self {
            open: MainResult::from_pana(open)?,
            close: MainResult::from_pana(close)?,
        })
    }
}

/// Raw declaration as entered by an admin (or read from a result file).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum ResultDeclaration {
    Main {
        pana: String,
        #[serde(default)]
        digit: Option<String>,
    },
    Starline {
        #[serde(rename = "winningNumber")]
        winning_number: String,
    },
}

impl ResultDeclaration {
    /// Validate the declaration and produce the result bets settle against.
    pub fn declare(&self, enforce_digit_sum: bool) -> Result<DeclaredResult, EngineError> {
        let result = match self {
            ResultDeclaration::Main { pana, digit: Some(digit) } => {
                DeclaredResult::Main(MainResult::declare(pana, digit, enforce_digit_sum)?)
            }
            ResultDeclaration::Main { pana, digit: None } => {
                DeclaredResult::Main(MainResult::from_pana(pana)?)
            }
            ResultDeclaration::Starline { winning_number } => {
                DeclaredResult::Starline(StarlineResult::declare(winning_number)?)
            }
        };
        info!(result = %result, "Result declared");
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
