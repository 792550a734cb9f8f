//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Payout rates are keyed by the wire tags of each vocabulary and are
//! checked when converted into a `PayoutRates` table.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

use crate::types::{BetType, EngineError, MainBetType, PayoutRates, StarlineBetType};

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub rates: RatesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Reject main-game declarations whose digit is not the pana's digit
    /// sum mod 10.
    #[serde(default = "default_true")]
    pub enforce_digit_sum: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enforce_digit_sum: true,
        }
    }
}

/// Multipliers per bet type, keyed by wire tag.
///
/// A section left out of the file keeps the standard rates. A section that
/// is present replaces the standard one wholesale, so a bet type missing
/// from it has no rate and its winners fail with a configuration gap.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RatesConfig {
    #[serde(default = "standard_main_rates")]
    pub main: HashMap<String, Decimal>,
    #[serde(default = "standard_starline_rates")]
    pub starline: HashMap<String, Decimal>,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_filter() -> String {
    "matka=info".to_string()
}

fn standard_main_rates() -> HashMap<String, Decimal> {
    RatesConfig::standard().main
}

fn standard_starline_rates() -> HashMap<String, Decimal> {
    RatesConfig::standard().starline
}

impl RatesConfig {
    /// The usual market rates.
    pub fn standard() -> Self {
        let main = [
            (MainBetType::Single, dec!(10)),
            (MainBetType::Jodi, dec!(90)),
            (MainBetType::SinglePanna, dec!(140)),
            (MainBetType::DoublePanna, dec!(280)),
            (MainBetType::TriplePanna, dec!(700)),
            (MainBetType::HalfSangam, dec!(1000)),
            (MainBetType::FullSangam, dec!(10000)),
        ]
        .into_iter()
        .map(|(t, r)| (t.tag().to_string(), r))
        .collect();

        let starline = [
            (StarlineBetType::SingleDigit, dec!(10)),
            (StarlineBetType::SinglePana, dec!(140)),
            (StarlineBetType::DoublePana, dec!(280)),
            (StarlineBetType::TriplePana, dec!(700)),
        ]
        .into_iter()
        .map(|(t, r)| (t.tag().to_string(), r))
        .collect();

        Self { main, starline }
    }

    /// Build the payout table. Tags must belong to the vocabulary of the
    /// section they appear in, and rates must be positive.
    pub fn to_payout_rates(&self) -> Result<PayoutRates, EngineError> {
        let mut rates = PayoutRates::new();
        for (tag, rate) in &self.main {
            let bet_type = tag.parse::<MainBetType>()?;
            rates.insert(bet_type, check_rate(bet_type.into(), *rate)?);
        }
        for (tag, rate) in &self.starline {
            let bet_type = tag.parse::<StarlineBetType>()?;
            rates.insert(bet_type, check_rate(bet_type.into(), *rate)?);
        }
        Ok(rates)
    }
}

fn check_rate(bet_type: BetType, rate: Decimal) -> Result<Decimal, EngineError> {
    if rate <= Decimal::ZERO {
        return Err(EngineError::InvalidRate { bet_type, rate });
    }
    Ok(rate)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            rates: RatesConfig::standard(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text and check the rate table.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config
            .rates
            .to_payout_rates()
            .context("Invalid [rates] table")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config() {
        // Requires config.toml in the working directory.
        let result = AppConfig::load("config.toml");
        if let Ok(cfg) = result {
            assert!(cfg.engine.enforce_digit_sum);
            let rates = cfg.rates.to_payout_rates().unwrap();
            assert_eq!(rates.get(&MainBetType::Single.into()), Some(dec!(10)));
            assert_eq!(rates.get(&StarlineBetType::SingleDigit.into()), Some(dec!(10)));
        }
    }

    #[test]
    fn test_parse_minimal_config() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert!(cfg.engine.enforce_digit_sum);
        assert_eq!(cfg.logging.filter, "matka=info");
        assert_eq!(cfg.rates, RatesConfig::standard());
    }

    #[test]
    fn test_parse_rates_table() {
        let toml = r#"
            [engine]
            enforce_digit_sum = false

            [rates.main]
            single = 9.5
            singlePanna = 150

            [rates.starline]
            "single digit" = 9
        "#;
        let cfg = AppConfig::from_toml_str(toml).unwrap();
        assert!(!cfg.engine.enforce_digit_sum);

        let rates = cfg.rates.to_payout_rates().unwrap();
        assert_eq!(rates.len(), 3);
        assert_eq!(rates.get(&MainBetType::Single.into()), Some(dec!(9.5)));
        assert_eq!(rates.get(&MainBetType::SinglePanna.into()), Some(dec!(150)));
        assert_eq!(rates.get(&StarlineBetType::SingleDigit.into()), Some(dec!(9)));
        assert_eq!(rates.get(&MainBetType::Jodi.into()), None);
    }

    #[test]
    fn test_rates_reject_tag_from_other_vocabulary() {
        let toml = r#"
            [rates.main]
            "single digit" = 10
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rates_reject_negative() {
        let toml = r#"
            [rates.main]
            single = -1
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rates_reject_zero() {
        let toml = r#"
            [rates.main]
            single = 0
        "#;
        assert!(AppConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_missing_section_keeps_standard_rates() {
        let toml = r#"
            [rates.main]
            single = 9
        "#;
        let cfg = AppConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.rates.starline, RatesConfig::standard().starline);

        let rates = cfg.rates.to_payout_rates().unwrap();
        assert_eq!(rates.get(&MainBetType::Single.into()), Some(dec!(9)));
        // The main section was given, so it replaces the standard one.
        assert_eq!(rates.get(&MainBetType::Jodi.into()), None);
        assert_eq!(rates.get(&StarlineBetType::TriplePana.into()), Some(dec!(700)));
    }

    #[test]
    fn test_standard_rates_cover_every_bet_type() {
        let rates = RatesConfig::standard().to_payout_rates().unwrap();
        assert_eq!(rates.len(), MainBetType::ALL.len() + StarlineBetType::ALL.len());
        assert_eq!(rates.get(&MainBetType::FullSangam.into()), Some(dec!(10000)));
    }
}
