use crate::foundation::math::{clamp_unit, finite_or_zero};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        finite_or_zero(a + (b - a) * t)
    }
}

impl Lerp for [f64; 2] {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        [<f64 as Lerp>::lerp(&a[0], &b[0], t), <f64 as Lerp>::lerp(&a[1], &b[1], t)]
    }
}

/// Where a query time falls relative to a sorted key sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bracket {
    /// No keys at all.
    Empty,
    /// Before the first key (or exactly at a sole key); holds the first key index.
    Before(usize),
    /// At or after the last key; holds the last key index.
    After(usize),
    /// Strictly between two keys: `keys[lo].time <= t < keys[hi].time`.
    Between { lo: usize, hi: usize, progress: f64 },
}

/// Locate `t` in `keys` (sorted ascending by `time_of`) with a binary search.
///
/// Keys sharing a timestamp collapse into one point: the bracket always lands on the last of
/// the duplicates, so the interpolation denominator is never zero for sorted input.
pub fn bracket<K>(keys: &[K], t: f64, time_of: impl Fn(&K) -> f64) -> Bracket {
    if keys.is_empty() {
        return Bracket::Empty;
    }
    let t = finite_or_zero(t);
    let idx = keys.partition_point(|k| time_of(k) <= t);

    if idx == 0 {
        return Bracket::Before(0);
    }
    if idx >= keys.len() {
        return Bracket::After(keys.len() - 1);
    }

    let lo = idx - 1;
    let hi = idx;
    let t0 = time_of(&keys[lo]);
    let t1 = time_of(&keys[hi]);
    let denom = t1 - t0;
    let progress = if denom > 0.0 {
        clamp_unit((t - t0) / denom)
    } else {
        1.0
    };
    Bracket::Between { lo, hi, progress }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
