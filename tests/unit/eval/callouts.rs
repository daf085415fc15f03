use super::*;
use crate::model::callout::CalloutAnchor;

fn callout(id: &str, start: f64, end: f64) -> EditorialCallout {
    EditorialCallout {
        id: id.to_string(),
        start_time: start,
        end_time: end,
        text: id.to_string(),
        detail: String::new(),
        anchor: CalloutAnchor {
            x: 0.0,
            y: 0.0,
            player_id: None,
        },
        decoration: None,
    }
}

fn active_ids(all: &[EditorialCallout], t: f64) -> Vec<&str> {
    active_callouts(all, t)
        .into_iter()
        .map(|c| c.id.as_str())
        .collect()
}

#[test]
fn window_membership_is_inclusive() {
    let all = vec![callout("a", 1.0, 4.0), callout("b", 5.0, 8.0)];
    assert!(active_ids(&all, 0.99).is_empty());
    assert_eq!(active_ids(&all, 1.0), vec!["a"]);
    assert_eq!(active_ids(&all, 4.0), vec!["a"]);
    assert!(active_ids(&all, 4.5).is_empty());
    assert_eq!(active_ids(&all, 8.0), vec!["b"]);
    assert!(active_ids(&all, 8.01).is_empty());
}

#[test]
fn nan_time_matches_nothing() {
    let all = vec![callout("a", 0.0, 4.0)];
    assert!(active_ids(&all, f64::NAN).is_empty());
}
