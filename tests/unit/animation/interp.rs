use super::*;

fn times(ts: &[f64]) -> Vec<f64> {
    ts.to_vec()
}

#[test]
fn empty_keys_have_no_bracket() {
    assert_eq!(bracket(&times(&[]), 1.0, |t| *t), Bracket::Empty);
}

#[test]
fn outside_range_holds_endpoints() {
    let keys = times(&[1.0, 2.0, 4.0]);
    assert_eq!(bracket(&keys, 0.5, |t| *t), Bracket::Before(0));
    assert_eq!(bracket(&keys, 4.0, |t| *t), Bracket::After(2));
    assert_eq!(bracket(&keys, 9.0, |t| *t), Bracket::After(2));
}

#[test]
fn between_keys_reports_progress() {
    let keys = times(&[0.0, 2.0, 4.0]);
    assert_eq!(
        bracket(&keys, 3.0, |t| *t),
        Bracket::Between {
            lo: 1,
            hi: 2,
            progress: 0.5
        }
    );
    assert_eq!(
        bracket(&keys, 0.0, |t| *t),
        Bracket::Between {
            lo: 0,
            hi: 1,
            progress: 0.0
        }
    );
}

#[test]
fn bracketing_holds_for_every_query() {
    let keys = times(&[0.0, 0.3, 0.3, 1.7, 5.0, 5.5]);
    let mut t = -1.0;
    while t < 7.0 {
        match bracket(&keys, t, |k| *k) {
            Bracket::Between { lo, hi, progress } => {
                assert!(keys[lo] <= t && t <= keys[hi], "t={t}");
                assert!((0.0..=1.0).contains(&progress));
            }
            Bracket::Before(i) => assert!(t < keys[i]),
            Bracket::After(i) => assert!(t >= keys[i]),
            Bracket::Empty => unreachable!(),
        }
        t += 0.05;
    }
}

#[test]
fn duplicate_timestamps_never_divide_by_zero() {
    let keys = times(&[1.0, 1.0, 1.0]);
    assert_eq!(bracket(&keys, 1.0, |t| *t), Bracket::After(2));
    assert_eq!(bracket(&keys, 0.0, |t| *t), Bracket::Before(0));
}

#[test]
fn non_finite_query_is_treated_as_zero() {
    let keys = times(&[0.0, 2.0]);
    assert_eq!(
        bracket(&keys, f64::NAN, |t| *t),
        Bracket::Between {
            lo: 0,
            hi: 1,
            progress: 0.0
        }
    );
}

#[test]
fn lerp_pairs_componentwise() {
    assert_eq!(<[f64; 2] as Lerp>::lerp(&[0.0, 10.0], &[10.0, 30.0], 0.5), [5.0, 20.0]);
    assert_eq!(<f64 as Lerp>::lerp(&20.0, &80.0, 0.5), 50.0);
}
