use super::*;

#[test]
fn non_finite_values_collapse_to_zero() {
    assert_eq!(finite_or_zero(f64::NAN), 0.0);
    assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
    assert_eq!(finite_or_zero(-2.5), -2.5);
    assert_eq!(clamp_pct(f64::NAN), 0.0);
    assert_eq!(clamp_pct(140.0), 100.0);
    assert_eq!(clamp_unit(-0.2), 0.0);
}

#[test]
fn normalize_key_folds_case_and_whitespace() {
    assert_eq!(normalize_key("  Play   Action "), "play action");
    assert_eq!(normalize_key("SHOTGUN"), normalize_key("shotgun"));
}

#[test]
fn truncate_counts_chars_not_bytes() {
    assert_eq!(truncate_chars("abcdef", 3), "abc");
    assert_eq!(truncate_chars("ab", 3), "ab");
    assert_eq!(truncate_chars("ééééé", 2), "éé");
}
