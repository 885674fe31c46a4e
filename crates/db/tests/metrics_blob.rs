mod support;

use carbon_core::CarbonMetrics;
use carbon_db::{DbError, METRICS_KEY};
use chrono::Utc;
use support::{reopen, setup_db};

#[test]
fn load_metrics_before_first_save_is_none() {
    let test_db = setup_db();
    assert!(test_db.db.load_metrics().expect("load").is_none());
}

#[test]
fn save_and_load_round_trip() {
    let test_db = setup_db();
    let mut metrics = CarbonMetrics::new(Utc::now());
    metrics.total_tokens = 120;
    metrics.total_co2_grams = 0.0515;
    metrics.sessions_count = 2;
    metrics.suggestions_accepted = 3;
    metrics.suggestions_shown = 9;
    metrics.total_characters = 480;
    test_db.db.save_metrics(&metrics).expect("save");

    let db = reopen(&test_db);
    let loaded = db.load_metrics().expect("load").expect("stored");
    assert_eq!(loaded, metrics);
}

#[test]
fn older_blob_without_new_fields_loads_with_defaults() {
    let test_db = setup_db();
    test_db
        .db
        .set_setting(
            METRICS_KEY,
            r#"{"totalTokens":10,"totalCO2Grams":0.5,"sessionsCount":1,"suggestionsAccepted":1,"suggestionsShown":0,"startDate":1700000000000}"#,
        )
        .expect("seed");

    let loaded = test_db.db.load_metrics().expect("load").expect("stored");
    assert_eq!(loaded.total_tokens, 10);
    assert_eq!(loaded.total_characters, 0);
    assert_eq!(loaded.start_date, 1_700_000_000_000);
    assert!(loaded.last_update_date > loaded.start_date);
}

#[test]
fn corrupt_blob_is_an_error() {
    let test_db = setup_db();
    test_db
        .db
        .set_setting(METRICS_KEY, "not json")
        .expect("seed");
    let err = test_db.db.load_metrics().unwrap_err();
    assert!(matches!(err, DbError::Serde(_)));
}
