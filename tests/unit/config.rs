use super::*;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = EngineConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.terminology.cooldown_s, 6.0);
    assert_eq!(cfg.terminology.max_terms_on_screen, 2);
    assert_eq!(cfg.broadcast.max_circles, 4);
    assert_eq!(cfg.placement.safe_margin_px, 8.0);
    assert_eq!(cfg.ingest.callouts.max_callouts, 3);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = EngineConfig::from_json_str(
        r#"{"terminology": {"cooldown_s": 10}, "session": {"broadcast_style": true}}"#,
    )
    .unwrap();
    assert_eq!(cfg.terminology.cooldown_s, 10.0);
    assert_eq!(cfg.terminology.display_duration_s, 4.0);
    assert!(cfg.session.broadcast_style);
    assert_eq!(cfg.interpolation, InterpolationOpts::default());
}

#[test]
fn invalid_values_are_rejected() {
    let err = EngineConfig::from_json_str(r#"{"ingest": {"callouts": {"max_callouts": 5}}}"#)
        .unwrap_err();
    assert!(matches!(err, GridmarkError::Validation(_)));

    let err = EngineConfig::from_json_str(r#"{"interpolation": {"late_entry_threshold": 2}}"#)
        .unwrap_err();
    assert!(matches!(err, GridmarkError::Validation(_)));
}

#[test]
fn unknown_sections_and_bad_json_are_serde_errors() {
    let err = EngineConfig::from_json_str(r#"{"render": {}}"#).unwrap_err();
    assert!(matches!(err, GridmarkError::Serde(_)));
    let err = EngineConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, GridmarkError::Serde(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = EngineConfig::from_path("/definitely/not/here/gridmark.json").unwrap_err();
    assert!(err.to_string().contains("gridmark.json"));
}
