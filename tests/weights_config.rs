// tests/weights_config.rs
use std::fs;
use std::path::PathBuf;

use stress_barometer::config::AppConfig;
use stress_barometer::{score_with, Factor, Inputs, WeightTable};

#[test]
fn load_toml_and_json_files() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("weights.toml");
    fs::write(&p_toml, "ros = 1.0\nspla2 = 0.0\n").unwrap();
    let w = WeightTable::load_from_file(&p_toml).unwrap();
    assert_eq!(w.ros, 1.0);
    assert_eq!(w.spla2, 0.0);
    assert_eq!(w.zn, -2.0);

    let p_json = dir.path().join("weights.json");
    fs::write(&p_json, r#"{"dpsi": -5.0}"#).unwrap();
    let wj = WeightTable::load_from_file(&p_json).unwrap();
    assert_eq!(wj.dpsi, -5.0);
    assert_eq!(wj.cpla2, 2.0);
}

#[test]
fn missing_file_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let w = WeightTable::load_or_default(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(w, WeightTable::default());
}

#[test]
fn broken_file_is_an_error_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("weights.toml");
    fs::write(&p, "ros = \"three\"\n").unwrap();

    let err = WeightTable::load_or_default(&p).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("weights.toml"), "{msg}");
}

#[test]
fn shipped_config_matches_builtin_table() {
    let w = WeightTable::load_from_file(&PathBuf::from("config/weights.toml")).unwrap();
    assert_eq!(w, WeightTable::default());
}

#[test]
fn calibrated_weights_change_the_score() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("weights.json");
    fs::write(&p, r#"{"ros": 0.0, "cpla2": 10.0}"#).unwrap();
    let w = WeightTable::load_from_file(&p).unwrap();

    let a = score_with(&w, &Inputs::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0));
    assert_eq!(a.dominant.factor, Factor::Cpla2);
    assert!((a.logit - 10.0).abs() < 1e-12);
}

#[tokio::test]
async fn app_fails_fast_on_broken_weights() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("weights.toml");
    fs::write(&p, "not toml at all ===").unwrap();

    let cfg = AppConfig {
        weights_path: p,
        ..AppConfig::default()
    };
    assert!(stress_barometer::app_with_config(cfg).await.is_err());
}
