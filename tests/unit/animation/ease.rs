use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::OutCubic,
        Ease::InOutCubic,
    ] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert!((ease.apply(7.0) - 1.0).abs() < 1e-12);
    }
}

#[test]
fn window_opacity_ramps_at_both_edges() {
    let e = Ease::Linear;
    assert_eq!(e.window_opacity(-0.1, 0.0, 3.0, 0.3), 0.0);
    assert!((e.window_opacity(0.15, 0.0, 3.0, 0.3) - 0.5).abs() < 1e-9);
    assert_eq!(e.window_opacity(1.5, 0.0, 3.0, 0.3), 1.0);
    assert!((e.window_opacity(2.85, 0.0, 3.0, 0.3) - 0.5).abs() < 1e-9);
    assert_eq!(e.window_opacity(3.0, 0.0, 3.0, 0.3), 0.0);
    assert_eq!(e.window_opacity(3.1, 0.0, 3.0, 0.3), 0.0);
}

#[test]
fn window_opacity_without_fade_is_a_step() {
    assert_eq!(Ease::Linear.window_opacity(0.0, 0.0, 1.0, 0.0), 1.0);
    assert_eq!(Ease::Linear.window_opacity(f64::NAN, 0.0, 1.0, 0.3), 0.0);
}
