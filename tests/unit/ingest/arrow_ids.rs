use super::*;
use crate::foundation::core::Rgb8;

fn arrow(from: [f64; 2], to: [f64; 2]) -> ArrowAnnotation {
    ArrowAnnotation {
        id: String::new(),
        from,
        to,
        color: Rgb8::WHITE,
        label: None,
        dashed: false,
    }
}

fn frame(ts: f64, arrows: Vec<ArrowAnnotation>) -> AnnotationFrame {
    AnnotationFrame {
        timestamp: ts,
        arrows,
        ..AnnotationFrame::default()
    }
}

fn ids(f: &AnnotationFrame) -> Vec<&str> {
    f.arrows.iter().map(|a| a.id.as_str()).collect()
}

#[test]
fn jittered_arrows_keep_their_identity() {
    let mut frames = vec![
        frame(0.0, vec![arrow([10.0, 10.0], [20.0, 20.0]), arrow([60.0, 60.0], [70.0, 50.0])]),
        frame(
            1.0,
            vec![arrow([61.0, 60.5], [70.5, 50.0]), arrow([10.4, 9.8], [20.2, 20.1])],
        ),
    ];
    assign_arrow_ids(&mut frames, 12.0);
    assert_eq!(ids(&frames[0]), vec!["arrow-0", "arrow-1"]);
    assert_eq!(ids(&frames[1]), vec!["arrow-1", "arrow-0"]);
}

#[test]
fn distant_arrows_get_fresh_ids() {
    let mut frames = vec![
        frame(0.0, vec![arrow([10.0, 10.0], [20.0, 20.0])]),
        frame(1.0, vec![arrow([80.0, 80.0], [90.0, 90.0])]),
    ];
    assign_arrow_ids(&mut frames, 12.0);
    assert_eq!(ids(&frames[0]), vec!["arrow-0"]);
    assert_eq!(ids(&frames[1]), vec!["arrow-1"]);
}

#[test]
fn each_predecessor_is_matched_once() {
    let mut frames = vec![
        frame(0.0, vec![arrow([10.0, 10.0], [20.0, 20.0])]),
        frame(
            1.0,
            vec![arrow([11.0, 10.0], [21.0, 20.0]), arrow([10.0, 10.0], [20.0, 20.0])],
        ),
    ];
    assign_arrow_ids(&mut frames, 12.0);
    assert_eq!(ids(&frames[1]), vec!["arrow-1", "arrow-0"]);
}

#[test]
fn identity_chains_across_many_frames() {
    let mut frames = (0..5)
        .map(|i| {
            let dx = f64::from(i) * 3.0;
            frame(f64::from(i), vec![arrow([10.0 + dx, 10.0], [20.0 + dx, 20.0])])
        })
        .collect::<Vec<_>>();
    assign_arrow_ids(&mut frames, 12.0);
    assert!(frames.iter().all(|f| ids(f) == vec!["arrow-0"]));
}
