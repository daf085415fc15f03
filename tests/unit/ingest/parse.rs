use super::*;
use serde_json::json;

#[test]
fn frame_fields_are_sanitized() {
    let raw = json!({
        "timestamp": -2.0,
        "players": [
            {"id": "p1", "x": 140.0, "y": "33.5", "label": "QB", "highlight": true, "color": "#ff0000"},
            {"id": 7, "x": null, "y": -5, "color": "nope"}
        ],
        "arrows": [{"from": [10, 20], "to": {"x": 30, "y": 40}, "label": "  ", "dashed": true}],
        "terminology": [{"x": 50, "y": 50, "term": " Shotgun ", "duration": -1}]
    });
    let mut rejections = Vec::new();
    let frame = parse_frame(&raw, "$.frames[0]", 3.0, &mut rejections).unwrap();

    assert!(rejections.is_empty());
    assert_eq!(frame.timestamp, 0.0);
    assert_eq!(frame.players[0].x, 100.0);
    assert_eq!(frame.players[0].y, 33.5);
    assert_eq!(frame.players[0].color, Rgb8::new(0xff, 0, 0));
    assert!(frame.players[0].highlight);
    assert_eq!(frame.players[1].id, "7");
    assert_eq!((frame.players[1].x, frame.players[1].y), (0.0, 0.0));
    assert_eq!(frame.players[1].color, Rgb8::WHITE);
    assert_eq!(frame.arrows[0].from, [10.0, 20.0]);
    assert_eq!(frame.arrows[0].to, [30.0, 40.0]);
    assert_eq!(frame.arrows[0].label, None);
    assert!(frame.arrows[0].dashed);
    assert_eq!(frame.terminology[0].term, "Shotgun");
    assert_eq!(frame.terminology[0].duration, 3.0);
}

#[test]
fn invalid_entities_are_rejected_individually() {
    let raw = json!({
        "timestamp": 1.0,
        "players": [{"x": 1}, {"id": "a"}, {"id": "a"}, 5],
        "terminology": [{"term": ""}, {"term": "Blitz"}]
    });
    let mut rejections = Vec::new();
    let frame = parse_frame(&raw, "$.frames[3]", 3.0, &mut rejections).unwrap();

    assert_eq!(frame.players.len(), 1);
    assert_eq!(frame.terminology.len(), 1);
    assert_eq!(
        rejections,
        vec![
            Rejection::MissingField {
                at: "$.frames[3].players[0]".to_string(),
                field: "id"
            },
            Rejection::DuplicateId {
                at: "$.frames[3].players[2]".to_string(),
                id: "a".to_string()
            },
            Rejection::NotAnObject {
                at: "$.frames[3].players[3]".to_string()
            },
            Rejection::MissingField {
                at: "$.frames[3].terminology[0]".to_string(),
                field: "term"
            },
        ]
    );
}

#[test]
fn non_object_frame_is_rejected() {
    let mut rejections = Vec::new();
    let err = parse_frame(&json!([1, 2]), "$.frames[0]", 3.0, &mut rejections).unwrap_err();
    assert!(matches!(err, Rejection::NotAnObject { .. }));
}

#[test]
fn callout_requires_core_fields() {
    let ok = json!({
        "id": "c1", "start_time": 1, "end_time": 5, "text": "Backside pursuit",
        "anchor": {"x": 40, "y": 60, "player_id": "p3"},
        "circle": {"x": 40, "y": 60, "radius": 5},
        "arrow": {"from": [0, 0], "to": [1, 1]}
    });
    let c = parse_callout(&ok, "$.callouts[0]").unwrap();
    assert_eq!(c.anchor.player_id.as_deref(), Some("p3"));
    assert_eq!(
        c.decoration,
        Some(CalloutDecoration::Circle {
            x: 40.0,
            y: 60.0,
            radius: 5.0
        })
    );

    let no_anchor = json!({"id": "c2", "start_time": 1, "end_time": 5, "text": "x"});
    assert_eq!(
        parse_callout(&no_anchor, "$.callouts[1]").unwrap_err(),
        Rejection::MissingField {
            at: "$.callouts[1]".to_string(),
            field: "anchor"
        }
    );

    let bad_anchor = json!({"id": "c3", "start_time": 1, "end_time": 5, "text": "x", "anchor": {"x": 1}});
    assert_eq!(
        parse_callout(&bad_anchor, "$.callouts[2]").unwrap_err(),
        Rejection::MissingField {
            at: "$.callouts[2].anchor".to_string(),
            field: "y"
        }
    );

    let no_end = json!({"id": "c4", "start_time": 1, "text": "x", "anchor": {"x": 1, "y": 1}});
    assert!(matches!(
        parse_callout(&no_end, "$.callouts[3]").unwrap_err(),
        Rejection::MissingField {
            field: "end_time",
            ..
        }
    ));
}

#[test]
fn malformed_decoration_falls_back_to_legacy_keys() {
    let raw = json!({
        "id": "c1", "start_time": 1, "end_time": 5, "text": "Backside pursuit",
        "anchor": {"x": 40, "y": 60},
        "decoration": {"circle": {"x": "left"}},
        "arrow": {"from": [10, 20], "to": [30, 40]}
    });
    let c = parse_callout(&raw, "$.callouts[0]").unwrap();
    assert_eq!(
        c.decoration,
        Some(CalloutDecoration::Arrow {
            from: [10.0, 20.0],
            to: [30.0, 40.0]
        })
    );

    let raw = json!({
        "id": "c2", "start_time": 1, "end_time": 5, "text": "Backside pursuit",
        "anchor": {"x": 40, "y": 60},
        "decoration": "glow"
    });
    assert_eq!(parse_callout(&raw, "$.callouts[1]").unwrap().decoration, None);
}

#[test]
fn rejection_messages_carry_paths() {
    let r = Rejection::MissingField {
        at: "$.frames[1].players[0]".to_string(),
        field: "id",
    };
    assert_eq!(
        r.to_string(),
        "$.frames[1].players[0]: missing required field 'id'"
    );
}
