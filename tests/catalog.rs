//! 카탈로그 스키마 검증과 파일 로드.
use std::path::PathBuf;
use std::time::Duration;

use solar_pump_selector::catalog::{
    load_from_path, Catalog, CatalogError, PowerRating, SkipReason,
};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "solar_pump_selector_{}_{name}",
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn power_label_numeric_prefix() {
    let p = PowerRating::parse("0.5 cv").unwrap();
    assert_eq!(p.magnitude, 0.5);
    assert_eq!(p.unit, "cv");
    assert_eq!(p.label, "0.5 cv");

    assert_eq!(PowerRating::parse("1,5 cv").unwrap().magnitude, 1.5);
    assert_eq!(PowerRating::parse("2cv").unwrap().unit, "cv");
    assert_eq!(PowerRating::parse("  3 ").unwrap().magnitude, 3.0);
    assert_eq!(PowerRating::parse(".75 kW").unwrap().magnitude, 0.75);
    assert!(PowerRating::parse("cv").is_none());
    assert!(PowerRating::parse("").is_none());
    assert!(PowerRating::parse("-1 cv").is_none());
    let zero = PowerRating::parse("-0 cv").unwrap();
    assert_eq!(zero.magnitude, 0.0);
    assert!(zero.magnitude.is_sign_positive());
}

#[test]
fn sample_catalog_loads_sorted() {
    let c = Catalog::from_json(include_str!("../data/bombas.json")).unwrap();
    assert_eq!(c.len(), 6);
    assert!(c.warnings.is_empty());
    for p in &c.pumps {
        assert!(p.curve.windows(2).all(|w| w[0].flow <= w[1].flow), "{}", p.model);
    }
    assert!(c.find("SP 5-60").is_some());
}

#[test]
fn unsorted_curve_is_sorted_at_load() {
    let c = Catalog::from_json(
        r#"[{"modelo": "X", "potencia": "1 cv",
             "dados": [{"vazao": 4, "altura": 10}, {"vazao": 0, "altura": 50}, {"vazao": 2, "altura": 30}]}]"#,
    )
    .unwrap();
    let flows: Vec<f64> = c.pumps[0].curve.iter().map(|p| p.flow).collect();
    assert_eq!(flows, [0.0, 2.0, 4.0]);
}

#[test]
fn malformed_records_are_skipped_with_warnings() {
    let json = r#"[
        {"modelo": "ok", "potencia": "1 cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "  ", "potencia": "1 cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "nopower", "potencia": "cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "nocurve", "potencia": "1 cv", "dados": []},
        {"modelo": "missingcurve", "potencia": "1 cv"},
        {"modelo": "negative", "potencia": "1 cv", "dados": [{"vazao": -1, "altura": 10}]}
    ]"#;
    let c = Catalog::from_json(json).unwrap();
    assert_eq!(c.len(), 1);
    let reasons: Vec<SkipReason> = c.warnings.iter().map(|w| w.reason).collect();
    assert_eq!(
        reasons,
        [
            SkipReason::BlankModel,
            SkipReason::InvalidPower,
            SkipReason::EmptyCurve,
            SkipReason::EmptyCurve,
            SkipReason::InvalidPoint,
        ]
    );
    assert_eq!(c.warnings[2].index, 3);
    assert!(c.warnings[2].to_string().contains("nocurve"));
}

#[test]
fn duplicate_model_fails_the_load() {
    let json = r#"[
        {"modelo": "A", "potencia": "1 cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "A ", "potencia": "2 cv", "dados": [{"vazao": 0, "altura": 20}]}
    ]"#;
    match Catalog::from_json(json) {
        Err(CatalogError::DuplicateModel(m)) => assert_eq!(m, "A"),
        other => panic!("expected duplicate model, got {other:?}"),
    }
}

#[test]
fn duplicate_model_is_reported_before_record_checks() {
    let json = r#"[
        {"modelo": "A", "potencia": "1 cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "A", "potencia": "2 cv", "dados": []}
    ]"#;
    match Catalog::from_json(json) {
        Err(CatalogError::DuplicateModel(m)) => assert_eq!(m, "A"),
        other => panic!("expected duplicate model, got {other:?}"),
    }

    let json = r#"[
        {"modelo": "B", "potencia": "cv", "dados": [{"vazao": 0, "altura": 10}]},
        {"modelo": "B", "potencia": "1 cv", "dados": [{"vazao": 0, "altura": 10}]}
    ]"#;
    assert!(matches!(
        Catalog::from_json(json),
        Err(CatalogError::DuplicateModel(_))
    ));
}

#[test]
fn wrong_shape_is_a_parse_error() {
    assert!(matches!(
        Catalog::from_json(r#"{"modelo": "A"}"#),
        Err(CatalogError::Parse(_))
    ));
    assert!(matches!(
        Catalog::from_json(r#"[{"modelo": "A", "potencia": "1", "dados": [{"vazao": "x", "altura": 1}]}]"#),
        Err(CatalogError::Parse(_))
    ));
}

#[test]
fn no_usable_pumps_is_an_error() {
    assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
}

#[test]
fn load_from_file() {
    let path = temp_file("ok.json", include_str!("../data/bombas.json"));
    let c = load_from_path(&path, Duration::from_secs(5)).unwrap();
    assert_eq!(c.len(), 6);
    let _ = std::fs::remove_file(path);
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("solar_pump_selector_definitely_missing.json");
    assert!(matches!(
        load_from_path(&path, Duration::from_secs(5)),
        Err(CatalogError::Io { .. })
    ));
}

#[cfg(unix)]
#[test]
fn blocked_read_times_out() {
    let path = std::env::temp_dir().join(format!(
        "solar_pump_selector_{}_blocked.fifo",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    // 쓰는 쪽이 없는 FIFO는 열기에서 멈춘다.
    let status = std::process::Command::new("mkfifo")
        .arg(&path)
        .status()
        .unwrap();
    assert!(status.success());

    let started = std::time::Instant::now();
    let result = load_from_path(&path, Duration::from_millis(100));
    assert!(
        matches!(result, Err(CatalogError::Timeout(t)) if t == Duration::from_millis(100)),
        "{result:?}"
    );
    assert!(started.elapsed() < Duration::from_secs(5));
    let _ = std::fs::remove_file(path);
}
