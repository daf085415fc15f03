use super::*;

#[test]
fn concept_matching_is_whole_word() {
    assert!(is_concept("Pursuit angle"));
    assert!(is_concept("great PASS-RUSH here"));
    assert!(!is_concept("bypass"));
    assert!(!is_concept(""));
}

#[test]
fn position_labels_strip_depth_digits() {
    assert!(is_position_label("QB"));
    assert!(is_position_label("wr1"));
    assert!(is_position_label("LT / LG"));
    assert!(!is_position_label("QB scramble"));
    assert!(!is_position_label("12"));
    assert!(!is_position_label(""));
}

#[test]
fn concepts_outrank_positions() {
    assert_eq!(classify_label("Zone coverage"), LabelKind::Concept);
    assert_eq!(classify_label("CB"), LabelKind::Position);
    assert_eq!(classify_label("Player 7"), LabelKind::Other);
    assert!(LabelKind::Concept < LabelKind::Other);
    assert!(LabelKind::Other < LabelKind::Position);
}

#[test]
fn core_terms_match_exact_phrase_only() {
    assert!(is_core_term("Shotgun"));
    assert!(is_core_term("  play   ACTION "));
    assert!(!is_core_term("shotgun snap"));
}

#[test]
fn key_actor_and_causality_vocab() {
    assert!(is_key_actor("Ball Carrier"));
    assert!(is_key_actor("lead blocker"));
    assert!(!is_key_actor("WR"));
    assert!(claims_causality("The seal led to a cutback lane"));
    assert!(!claims_causality("Trips right formation"));
    assert!(mentions_setup_term("Trips right formation"));
    assert!(mentions_setup_term("I-Formation"));
    assert!(mentions_action_concept("Backside pursuit closes"));
}
