use super::*;
use crate::foundation::core::Rgb8;
use crate::model::annotation::TerminologyAnnotation;

fn player(id: &str, label: &str, highlight: bool) -> Faded<PlayerAnnotation> {
    Faded::opaque(PlayerAnnotation {
        id: id.to_string(),
        x: 50.0,
        y: 50.0,
        label: label.to_string(),
        highlight,
        color: Rgb8::WHITE,
    })
}

fn arrow(id: &str, label: Option<&str>) -> Faded<ArrowAnnotation> {
    Faded {
        value: ArrowAnnotation {
            id: id.to_string(),
            from: [10.0, 10.0],
            to: [20.0, 30.0],
            color: Rgb8::WHITE,
            label: label.map(str::to_string),
            dashed: false,
        },
        opacity: 0.75,
    }
}

fn term(name: &str) -> FadedTerm {
    FadedTerm {
        value: TerminologyAnnotation {
            x: 40.0,
            y: 60.0,
            term: name.to_string(),
            definition: String::new(),
            duration: 3.0,
        },
        opacity: 1.0,
        start_time: 0.0,
    }
}

fn opts() -> BroadcastOpts {
    BroadcastOpts::default()
}

#[test]
fn only_key_actors_are_circled_concepts_first() {
    let players = [
        player("wr", "WR", false),
        player("qb", "QB", true),
        player("bc", "Ball carrier", true),
        player("lb", "Lead blocker", false),
        player("pu", "Pursuit", true),
        player("rc", "Receiver", false),
    ];
    let out = filter_frame(&players, &[], &[], false, &opts());
    let ids: Vec<_> = out.players.iter().map(|p| p.value.id.as_str()).collect();
    assert_eq!(ids, vec!["pu", "bc", "lb", "rc"]);
}

#[test]
fn arrows_rank_concept_labels_over_positions() {
    let arrows = [
        arrow("a0", None),
        arrow("a1", Some("WR route")),
        arrow("a2", Some("QB")),
        arrow("a3", Some("Motion")),
        arrow("a4", Some("Pass rush")),
    ];
    let out = filter_frame(&[], &arrows, &[], false, &opts());
    let ids: Vec<_> = out.arrows.iter().map(|a| a.value.id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a4", "a3", "a0"]);
}

#[test]
fn callouts_pool_arrow_labels_and_dedupe() {
    let arrows = [
        arrow("a0", Some("Pass rush")),
        arrow("a1", Some("pass  RUSH")),
        arrow("a2", Some("QB")),
    ];
    let terms = [term("Blitz")];
    let out = filter_frame(&[], &arrows, &terms, false, &opts());

    let texts: Vec<_> = out.callouts.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Pass rush", "QB"]);
    assert_eq!(out.callouts[0].anchor, [20.0, 30.0]);
    assert_eq!(out.callouts[0].source, CalloutSource::Arrow);
    assert_eq!(out.callouts[0].kind, LabelKind::Concept);
    assert_eq!(out.callouts[0].opacity, 0.75);
    assert!(out.terminology.is_empty());
}

#[test]
fn learn_mode_adds_terms_to_callouts_and_popups() {
    let arrows = [arrow("a0", Some("QB")), arrow("a1", Some("Blitz"))];
    let terms = [term("Trips"), term("Blitz"), term("Cover 2"), term("Pocket")];
    let out = filter_frame(&[], &arrows, &terms, true, &opts());

    let texts: Vec<_> = out.callouts.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Blitz", "Cover 2", "Pocket", "Trips"]);
    assert_eq!(out.callouts[0].source, CalloutSource::Arrow);
    assert_eq!(out.callouts[1].source, CalloutSource::Terminology);

    let popups: Vec<_> = out
        .terminology
        .iter()
        .map(|t| t.value.term.as_str())
        .collect();
    assert_eq!(popups, vec!["Blitz", "Cover 2"]);
}

#[test]
fn caps_are_respected() {
    let players: Vec<_> = (0..9)
        .map(|i| player(&format!("p{i}"), "Ball carrier", true))
        .collect();
    let arrows: Vec<_> = (0..9)
        .map(|i| arrow(&format!("a{i}"), Some(&format!("route {i}"))))
        .collect();
    let out = filter_frame(&players, &arrows, &[], false, &opts());
    assert_eq!(out.players.len(), 4);
    assert_eq!(out.arrows.len(), 4);
    assert_eq!(out.callouts.len(), 4);
    assert_eq!(out.players[0].value.id, "p0");
}

#[test]
fn opts_validation() {
    assert!(opts().validate().is_ok());
    let bad = BroadcastOpts {
        max_circles: 0,
        max_arrows: 0,
        max_callouts: 0,
        max_micro_stories: 0,
    };
    assert!(bad.validate().is_err());
}
