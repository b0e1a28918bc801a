use super::*;

#[test]
fn defaults_match_forty_five_fps_on_sixty_hz() {
    let cfg = LoopConfig::default();
    cfg.validate().unwrap();
    let ms = cfg.frame_interval().as_secs_f64() * 1000.0;
    assert!((ms - 22.222).abs() < 0.001, "{ms}");
    let refresh = cfg.refresh_interval().as_secs_f64() * 1000.0;
    assert!((refresh - 16.667).abs() < 0.001, "{refresh}");
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = LoopConfig::from_json_str(r#"{ "refresh_hz": 120 }"#).unwrap();
    assert_eq!(cfg.target_fps, Fps { num: 45, den: 1 });
    assert_eq!(cfg.refresh_hz, 120);

    let cfg = LoopConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, LoopConfig::default());
}

#[test]
fn zero_rates_are_rejected() {
    let err = LoopConfig::from_json_str(r#"{ "refresh_hz": 0 }"#).unwrap_err();
    assert!(matches!(err, TreevisError::Validation(_)));

    let err =
        LoopConfig::from_json_str(r#"{ "target_fps": { "num": 0, "den": 1 } }"#).unwrap_err();
    assert!(matches!(err, TreevisError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = LoopConfig::from_json_str(r#"{ "target_fps": 45 }"#).unwrap_err();
    assert!(matches!(err, TreevisError::Serde(_)));
    let err = LoopConfig::from_json_str(r#"{ "fps": 45 }"#).unwrap_err();
    assert!(matches!(err, TreevisError::Serde(_)));
}

#[test]
fn load_reads_from_disk() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("target/config_unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("loop.json");
    std::fs::write(&path, r#"{ "target_fps": { "num": 30, "den": 1 } }"#).unwrap();

    let cfg = LoopConfig::load(&path).unwrap();
    assert_eq!(cfg.target_fps.num, 30);

    let missing = LoopConfig::load(&dir.join("nope.json")).unwrap_err();
    assert!(matches!(missing, TreevisError::Other(_)));
}
