//! File-based settlement: bets and result exported as JSON, report
//! written back as JSON.

use matka::config::AppConfig;
use matka::engine::Settler;
use matka::rates::RateSource;
use matka::storage;
use matka::types::SettlementStatus;
use rust_decimal_macros::dec;

fn temp_path(stem: &str) -> String {
    let mut p = std::env::temp_dir();
    p.push(format!("matka_it_{stem}_{}.json", uuid::Uuid::new_v4()));
    p.to_string_lossy().to_string()
}

#[test]
fn test_settle_from_exported_files() {
    let bets_path = temp_path("bets");
    let result_path = temp_path("result");
    let report_path = temp_path("report");

    std::fs::write(
        &bets_path,
        r#"[
            {"id":"a","betType":"single","betNumber":"6","amount":100},
            {"id":"b","betType":"singlePanna","betNumber":"123","amount":10.5},
            {"id":"c","betType":"triplePanna","betNumber":"777","amount":5},
            {"id":"d","betType":"halfSangam","betNumber":"123-4","amount":1}
        ]"#,
    )
    .unwrap();
    std::fs::write(&result_path, r#"{"variant":"main","pana":"123","digit":"6"}"#).unwrap();

    let cfg = AppConfig::from_toml_str(
        r#"
        [rates.main]
        single = 9.5
        singlePanna = 140
        triplePanna = 700
        "#,
    )
    .unwrap();
    let rates = cfg.rates.payout_rates().unwrap();

    let bets = storage::load_bets(&bets_path).unwrap();
    let declared = storage::load_declaration(&result_path)
        .unwrap()
        .declare(cfg.engine.enforce_digit_sum)
        .unwrap();

    let report = Settler::settle(&bets, &declared, &rates);
    storage::save_report(&report, Some(&report_path)).unwrap();

    let saved = storage::load_report(&report_path).unwrap().unwrap();
    assert_eq!(saved.winners, 2);
    assert_eq!(saved.losers, 1);
    assert_eq!(saved.flagged, 1);
    // 100 x 9.5 = 950; 10.5 x 140 = 1470
    assert_eq!(saved.total_payout, dec!(2420));
    assert!(matches!(saved.lines[3].status, SettlementStatus::Flagged { .. }));

    for p in [&bets_path, &result_path, &report_path] {
        std::fs::remove_file(p).unwrap();
    }
}

#[test]
fn test_inconsistent_result_file_is_rejected() {
    let result_path = temp_path("bad_result");
    std::fs::write(&result_path, r#"{"variant":"main","pana":"123","digit":"9"}"#).unwrap();

    let declaration = storage::load_declaration(&result_path).unwrap();
    assert!(declaration.declare(true).is_err());
    assert!(declaration.declare(false).is_ok());

    std::fs::remove_file(&result_path).unwrap();
}
