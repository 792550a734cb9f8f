//! Shared types for the MATKA engine.
//!
//! Bet vocabularies, declared results, payout tables and the error
//! taxonomy live here so that the validator, matcher, payout and
//! settlement modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Bet vocabularies
// ---------------------------------------------------------------------------

/// Game variant a bet or result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameVariant {
    Main,
    Starline,
}

impl fmt::Display for GameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameVariant::Main => write!(f, "main"),
            GameVariant::Starline => write!(f, "starline"),
        }
    }
}

/// Bet types of the main (open/close session) game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MainBetType {
    Single,
    Jodi,
    SinglePanna,
    DoublePanna,
    TriplePanna,
    HalfSangam,
    FullSangam,
}

impl MainBetType {
    pub const ALL: &'static [MainBetType] = &[
        MainBetType::Single,
        MainBetType::Jodi,
        MainBetType::SinglePanna,
        MainBetType::DoublePanna,
        MainBetType::TriplePanna,
        MainBetType::HalfSangam,
        MainBetType::FullSangam,
    ];

    /// Wire tag, exactly as the backend stores it.
    pub fn tag(&self) -> &'static str {
        match self {
            MainBetType::Single => "single",
            MainBetType::Jodi => "jodi",
            MainBetType::SinglePanna => "singlePanna",
            MainBetType::DoublePanna => "doublePanna",
            MainBetType::TriplePanna => "triplePanna",
            MainBetType::HalfSangam => "halfSangam",
            MainBetType::FullSangam => "fullSangam",
        }
    }

    /// The Starline bet type covering the same concept, if there is one.
    /// Jodi and sangam bets have no Starline counterpart.
    pub fn starline_equivalent(&self) -> Option<StarlineBetType> {
        match self {
            MainBetType::Single => Some(StarlineBetType::SingleDigit),
            MainBetType::SinglePanna => Some(StarlineBetType::SinglePana),
            MainBetType::DoublePanna => Some(StarlineBetType::DoublePana),
            MainBetType::TriplePanna => Some(StarlineBetType::TriplePana),
            MainBetType::Jodi | MainBetType::HalfSangam | MainBetType::FullSangam => None,
        }
    }
}

impl fmt::Display for MainBetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for MainBetType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MainBetType::ALL
            .iter()
            .find(|t| t.tag() == s)
            .copied()
            .ok_or_else(|| EngineError::UnknownBetType(s.to_string()))
    }
}

/// Bet types of the Starline variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarlineBetType {
    #[serde(rename = "single digit")]
    SingleDigit,
    #[serde(rename = "single pana")]
    SinglePana,
    #[serde(rename = "double pana")]
    DoublePana,
    #[serde(rename = "triple pana")]
    TriplePana,
}

impl StarlineBetType {
    pub const ALL: &'static [StarlineBetType] = &[
        StarlineBetType::SingleDigit,
        StarlineBetType::SinglePana,
        StarlineBetType::DoublePana,
        StarlineBetType::TriplePana,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            StarlineBetType::SingleDigit => "single digit",
            StarlineBetType::SinglePana => "single pana",
            StarlineBetType::DoublePana => "double pana",
            StarlineBetType::TriplePana => "triple pana",
        }
    }

    /// The main-game bet type covering the same concept.
    pub fn main_equivalent(&self) -> MainBetType {
        match self {
            StarlineBetType::SingleDigit => MainBetType::Single,
            StarlineBetType::SinglePana => MainBetType::SinglePanna,
            StarlineBetType::DoublePana => MainBetType::DoublePanna,
            StarlineBetType::TriplePana => MainBetType::TriplePanna,
        }
    }
}

impl fmt::Display for StarlineBetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for StarlineBetType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StarlineBetType::ALL
            .iter()
            .find(|t| t.tag() == s)
            .copied()
            .ok_or_else(|| EngineError::UnknownBetType(s.to_string()))
    }
}

/// A bet type from either vocabulary.
///
/// The two vocabularies stay distinct: `single` and `single digit` are
/// different values even though they settle the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BetType {
    Main(MainBetType),
    Starline(StarlineBetType),
}

impl BetType {
    pub fn tag(&self) -> &'static str {
        match self {
            BetType::Main(t) => t.tag(),
            BetType::Starline(t) => t.tag(),
        }
    }

    pub fn variant(&self) -> GameVariant {
        match self {
            BetType::Main(_) => GameVariant::Main,
            BetType::Starline(_) => GameVariant::Starline,
        }
    }

    /// Pana kind the bet number must satisfy, for pana bet types.
    pub fn required_pana_kind(&self) -> Option<PanaKind> {
        let main = match self {
            BetType::Main(t) => *t,
            BetType::Starline(t) => t.main_equivalent(),
        };
        match main {
            MainBetType::DoublePanna => Some(PanaKind::Double),
            MainBetType::TriplePanna => Some(PanaKind::Triple),
            _ => None,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl From<MainBetType> for BetType {
    fn from(t: MainBetType) -> Self {
        BetType::Main(t)
    }
}

impl From<StarlineBetType> for BetType {
    fn from(t: StarlineBetType) -> Self {
        BetType::Starline(t)
    }
}

/// Parse a wire tag from either vocabulary. Tags are case-sensitive.
impl std::str::FromStr for BetType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(t) = s.parse::<MainBetType>() {
            return Ok(BetType::Main(t));
        }
        s.parse::<StarlineBetType>().map(BetType::Starline)
    }
}

/// Digit-repetition class of a 3-digit number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanaKind {
    /// Three distinct digits (`123`).
    Single,
    /// Exactly two positions share a digit (`112`).
    Double,
    /// All three digits identical (`777`).
    Triple,
}

impl fmt::Display for PanaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanaKind::Single => write!(f, "single"),
            PanaKind::Double => write!(f, "double"),
            PanaKind::Triple => write!(f, "triple"),
        }
    }
}

// ---------------------------------------------------------------------------
// Declared results
// ---------------------------------------------------------------------------

/// Result of one main-game session (open or close).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainResult {
    pub pana: String,
    pub digit: String,
}

/// Result of one Starline draw. `digit` is derived when the result is
/// declared and carried alongside the winning number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarlineResult {
    pub winning_number: String,
    pub digit: String,
}

/// A declared result from either game variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum DeclaredResult {
    Main(MainResult),
    Starline(StarlineResult),
}

impl DeclaredResult {
    pub fn variant(&self) -> GameVariant {
        match self {
            DeclaredResult::Main(_) => GameVariant::Main,
            DeclaredResult::Starline(_) => GameVariant::Starline,
        }
    }

    /// The 3-digit number pana bets settle against.
    pub fn pana(&self) -> &str {
        match self {
            DeclaredResult::Main(r) => &r.pana,
            DeclaredResult::Starline(r) => &r.winning_number,
        }
    }

    /// The single digit single-digit bets settle against.
    pub fn digit(&self) -> &str {
        match self {
            DeclaredResult::Main(r) => &r.digit,
            DeclaredResult::Starline(r) => &r.digit,
        }
    }
}

impl fmt::Display for DeclaredResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}-{}", self.variant(), self.pana(), self.digit())
    }
}

/// Open and close session results of one main-game day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResults {
    pub open: MainResult,
    pub close: MainResult,
}

impl SessionResults {
    /// Two-digit jodi: open digit followed by close digit.
    pub fn jodi(&self) -> String {
        format!("{}{}", self.open.digit.trim(), self.close.digit.trim())
    }
}

impl fmt::Display for SessionResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.open.pana,
            self.jodi(),
            self.close.pana,
        )
    }
}

// ---------------------------------------------------------------------------
// Payout
// ---------------------------------------------------------------------------

/// Multiplier per bet type. Supplied by the caller; the engine never owns
/// or persists rates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayoutRates {
    rates: HashMap<BetType, Decimal>,
}

impl PayoutRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_rate(mut self, bet_type: impl Into<BetType>, rate: Decimal) -> Self {
        self.rates.insert(bet_type.into(), rate);
        self
    }

    pub fn insert(&mut self, bet_type: impl Into<BetType>, rate: Decimal) {
        self.rates.insert(bet_type.into(), rate);
    }

    pub fn get(&self, bet_type: &BetType) -> Option<Decimal> {
        self.rates.get(bet_type).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(BetType, Decimal)> for PayoutRates {
    fn from_iter<I: IntoIterator<Item = (BetType, Decimal)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Outcome of settling one bet against one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinDetermination {
    pub is_winner: bool,
    pub win_amount: Decimal,
}

impl WinDetermination {
    pub fn loss() -> Self {
        Self {
            is_winner: false,
            win_amount: Decimal::ZERO,
        }
    }

    pub fn win(win_amount: Decimal) -> Self {
        Self {
            is_winner: true,
            win_amount,
        }
    }
}

impl fmt::Display for WinDetermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_winner {
            write!(f, "WIN {}", self.win_amount)
        } else {
            write!(f, "LOSS")
        }
    }
}

/// Tagged match result. `Unsupported` keeps "the engine cannot settle this"
/// apart from "this bet lost".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched,
    NotMatched,
    Unsupported(String),
}

impl MatchOutcome {
    pub fn from_bool(matched: bool) -> Self {
        if matched {
            MatchOutcome::Matched
        } else {
            MatchOutcome::NotMatched
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, MatchOutcome::Matched)
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, MatchOutcome::Unsupported(_))
    }
}

/// Outcome of `validate_bet_number_format`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }

    /// Turn a failed validation into a `Format` error for `?` callers.
    pub fn into_result(self, bet_type: BetType) -> Result<(), EngineError> {
        if self.valid {
            Ok(())
        } else {
            Err(EngineError::Format {
                bet_type,
                reason: self.reason.unwrap_or_else(|| "invalid bet number".to_string()),
            })
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.valid, &self.reason) {
            (true, _) => write!(f, "valid"),
            (false, Some(reason)) => write!(f, "invalid: {reason}"),
            (false, None) => write!(f, "invalid"),
        }
    }
}

// ---------------------------------------------------------------------------
// Settlement records
// ---------------------------------------------------------------------------

/// A bet awaiting settlement, as exported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingBet {
    pub id: String,
    pub bet_type: BetType,
    pub bet_number: String,
    pub amount: Decimal,
}

impl fmt::Display for PendingBet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} stake={}",
            self.id, self.bet_type, self.bet_number, self.amount,
        )
    }
}

/// How a single bet came out of a settlement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SettlementStatus {
    Settled { determination: WinDetermination },
    /// The engine has no rule for this bet against this result.
    Flagged { reason: String },
    /// Settlement raised an engine error (missing rate, bad stake).
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementLine {
    pub bet_id: String,
    pub bet_type: BetType,
    pub bet_number: String,
    pub amount: Decimal,
    pub status: SettlementStatus,
}

/// Summary of settling a batch of bets against a declared result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReport {
    pub settlement_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Human-readable description of the result settled against.
    pub result: String,
    pub lines: Vec<SettlementLine>,
    pub winners: u64,
    pub losers: u64,
    pub flagged: u64,
    pub failed: u64,
    pub total_stake: Decimal,
    pub total_payout: Decimal,
}

impl SettlementReport {
    /// Bets that need operator attention (flagged or failed).
    pub fn needs_attention(&self) -> u64 {
        self.flagged + self.failed
    }

    /// House position after paying winners: stake taken minus payout.
    pub fn house_net(&self) -> Decimal {
        self.total_stake - self.total_payout
    }
}

impl fmt::Display for SettlementReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settlement {} ({}): bets={} won={} lost={} flagged={} failed={} stake={} payout={}",
            self.settlement_id,
            self.result,
            self.lines.len(),
            self.winners,
            self.losers,
            self.flagged,
            self.failed,
            self.total_stake,
            self.total_payout,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain errors raised by the engine. None of them are transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid {bet_type} bet number: {reason}")]
    Format { bet_type: BetType, reason: String },

    #[error("Unsupported bet type {bet_type}: {reason}")]
    UnsupportedBetType { bet_type: BetType, reason: String },

    #[error("No payout rate configured for {bet_type}")]
    ConfigurationGap { bet_type: BetType },

    #[error("Invalid payout rate for {bet_type}: {rate}")]
    InvalidRate { bet_type: BetType, rate: Decimal },

    #[error("Invalid stake: {0}")]
    InvalidStake(Decimal),

    #[error("Payout overflow for {bet_type}: stake {amount} x rate {rate}")]
    PayoutOverflow {
        bet_type: BetType,
        amount: Decimal,
        rate: Decimal,
    },

    #[error("Invalid result: {0}")]
    InvalidResult(String),

    #[error("Digit {digit} does not match pana {pana} (expected {expected})")]
    DigitMismatch {
        pana: String,
        digit: String,
        expected: String,
    },

    #[error("Unknown bet type: {0}")]
    UnknownBetType(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
