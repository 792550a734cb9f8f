//! End-to-end stake → declare → settle scenarios.

use matka::config::RatesConfig;
use matka::engine::{
    compute_win_amount, is_winning_bet, is_winning_day_bet, validate_bet_number_format,
    ResultDeclaration, Settler,
};
use matka::rates::RateSource;
use matka::types::*;
use rust_decimal_macros::dec;

fn stake(id: &str, bet_type: &str, number: &str, amount: rust_decimal::Decimal) -> PendingBet {
    let bet_type: BetType = bet_type.parse().unwrap();
    validate_bet_number_format(bet_type, number)
        .into_result(bet_type)
        .unwrap();
    PendingBet {
        id: id.to_string(),
        bet_type,
        bet_number: number.to_string(),
        amount,
    }
}

#[test]
fn test_single_bet_wins_ten_times_stake() {
    let result = DeclaredResult::Main(MainResult {
        pana: "250".into(),
        digit: "7".into(),
    });
    let rates = PayoutRates::new().with_rate(MainBetType::Single, dec!(10));
    let bet_type = BetType::Main(MainBetType::Single);

    assert_eq!(is_winning_bet(bet_type, "7", &result), MatchOutcome::Matched);
    assert_eq!(compute_win_amount(bet_type, dec!(100), &rates).unwrap(), dec!(1000));
}

#[test]
fn test_double_panna_valid_at_stake_but_loses_on_order() {
    let bet_type = BetType::Main(MainBetType::DoublePanna);
    assert!(validate_bet_number_format(bet_type, "122").valid);

    let result = DeclaredResult::Main(MainResult {
        pana: "221".into(),
        digit: "5".into(),
    });
    assert_eq!(is_winning_bet(bet_type, "122", &result), MatchOutcome::NotMatched);
}

#[test]
fn test_stake_rejects_malformed_numbers() {
    let cases = [
        ("single", "12"),
        ("jodi", "1"),
        ("doublePanna", "111"),
        ("doublePanna", "123"),
        ("triplePanna", "112"),
        ("double pana", "1234"),
        ("halfSangam", "12-3"),
        ("fullSangam", "123"),
    ];
    for (tag, number) in cases {
        let bet_type: BetType = tag.parse().unwrap();
        let err = validate_bet_number_format(bet_type, number)
            .into_result(bet_type)
            .unwrap_err();
        assert!(
            matches!(err, EngineError::Format { .. }),
            "{tag} {number} should be a format error"
        );
    }
}

#[test]
fn test_main_session_settlement_with_configured_rates() {
    let rates = RatesConfig::standard().payout_rates().unwrap();
    let declared = ResultDeclaration::Main {
        pana: "128".into(),
        digit: Some("1".into()),
    }
    .declare(true)
    .unwrap();

    let bets = vec![
        stake("1", "single", "1", dec!(50)),
        stake("2", "singlePanna", "128", dec!(10)),
        stake("3", "doublePanna", "112", dec!(10)),
        stake("4", "jodi", "12", dec!(10)),
    ];

    let report = Settler::settle(&bets, &declared, &rates);
    assert_eq!(report.winners, 2);
    assert_eq!(report.losers, 1);
    assert_eq!(report.flagged, 1);
    assert_eq!(report.failed, 0);
    // 50 x 10 + 10 x 140
    assert_eq!(report.total_payout, dec!(1900));
    assert_eq!(report.total_stake, dec!(80));
}

#[test]
fn test_starline_draw_settlement() {
    let rates = RatesConfig::standard().payout_rates().unwrap();
    let declared = ResultDeclaration::Starline {
        winning_number: "355".into(),
    }
    .declare(true)
    .unwrap();
    assert_eq!(declared.digit(), "3");

    let bets = vec![
        stake("1", "single digit", "3", dec!(10)),
        stake("2", "double pana", "355", dec!(10)),
        stake("3", "triple pana", "555", dec!(10)),
        // Main-game vocabulary never settles against a Starline draw.
        stake("4", "single", "3", dec!(10)),
    ];

    let report = Settler::settle(&bets, &declared, &rates);
    assert_eq!(report.winners, 2);
    assert_eq!(report.losers, 1);
    assert_eq!(report.flagged, 1);
    assert_eq!(report.total_payout, dec!(2900));
}

#[test]
fn test_declaration_rejects_inconsistent_digit() {
    let err = ResultDeclaration::Main {
        pana: "128".into(),
        digit: Some("2".into()),
    }
    .declare(true)
    .unwrap_err();
    assert!(matches!(err, EngineError::DigitMismatch { .. }));
}

#[test]
fn test_day_settlement_jodi_and_sangam() {
    let rates = RatesConfig::standard().payout_rates().unwrap();
    let day = SessionResults::from_panas("137", "580").unwrap();
    assert_eq!(day.jodi(), "13");

    assert!(is_winning_day_bet(MainBetType::Jodi.into(), "13", &day).is_win());

    let bets = vec![
        stake("1", "jodi", "13", dec!(10)),
        stake("2", "halfSangam", "137-3", dec!(1)),
        stake("3", "halfSangam", "1-580", dec!(1)),
        stake("4", "fullSangam", "137-580", dec!(1)),
        stake("5", "fullSangam", "580-137", dec!(1)),
    ];

    let report = Settler::settle_day(&bets, &day, &rates);
    assert_eq!(report.winners, 4);
    assert_eq!(report.losers, 1);
    // 10 x 90 + 1000 + 1000 + 10000
    assert_eq!(report.total_payout, dec!(12900));
}

#[test]
fn test_vocabulary_mapping_is_explicit() {
    for t in StarlineBetType::ALL {
        let main = t.main_equivalent();
        assert_ne!(BetType::from(*t), BetType::from(main));
        assert_eq!(main.starline_equivalent(), Some(*t));
    }
}
