use std::collections::{HashMap, HashSet};

use crate::animation::ease::Ease;
use crate::animation::interp::{Bracket, Lerp, bracket};
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::{clamp_unit, finite_or_zero};
use crate::model::annotation::{
    AnnotationFrame, ArrowAnnotation, Faded, FadedTerm, InterpolatedFrame, PlayerAnnotation,
};

/// Options for [`interpolate`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InterpolationOpts {
    /// Fade window at both ends of a term's visibility (seconds).
    pub term_fade_s: f64,
    /// Progress after which terms unique to the next keyframe start fading in.
    pub late_entry_threshold: f64,
    /// Curve applied to term fade ramps.
    pub fade_ease: Ease,
}

impl Default for InterpolationOpts {
    fn default() -> Self {
        Self {
            term_fade_s: 0.3,
            late_entry_threshold: 0.7,
            fade_ease: Ease::Linear,
        }
    }
}

impl InterpolationOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        if !self.term_fade_s.is_finite() || self.term_fade_s < 0.0 {
            return Err(GridmarkError::validation(
                "interpolation.term_fade_s must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.late_entry_threshold) {
            return Err(GridmarkError::validation(
                "interpolation.late_entry_threshold must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Resolve the annotation state at time `t` from keyframes sorted by timestamp.
///
/// Returns `None` only when `frames` is empty. Before the first keyframe the first one is returned
/// verbatim; at or after the last keyframe the last one is.
pub fn interpolate(
    frames: &[AnnotationFrame],
    t: f64,
    opts: &InterpolationOpts,
) -> Option<InterpolatedFrame> {
    let t = finite_or_zero(t);
    match bracket(frames, t, |f| f.timestamp) {
        Bracket::Empty => None,
        Bracket::Before(i) | Bracket::After(i) => Some(InterpolatedFrame::verbatim(&frames[i], t)),
        Bracket::Between { lo, hi, progress } => Some(InterpolatedFrame {
            time: t,
            progress,
            players: blend_players(&frames[lo].players, &frames[hi].players, progress),
            arrows: blend_arrows(&frames[lo].arrows, &frames[hi].arrows, progress),
            terminology: resolve_terms(&frames[lo], &frames[hi], t, progress, opts),
        }),
    }
}

fn blend_players(
    before: &[PlayerAnnotation],
    after: &[PlayerAnnotation],
    progress: f64,
) -> Vec<Faded<PlayerAnnotation>> {
    blend_by_id(before, after, progress, |p| p.id.as_str(), |a, b, t| {
        let discrete = if t < 0.5 { a } else { b };
        PlayerAnnotation {
            id: a.id.clone(),
            x: <f64 as Lerp>::lerp(&a.x, &b.x, t),
            y: <f64 as Lerp>::lerp(&a.y, &b.y, t),
            label: discrete.label.clone(),
            highlight: discrete.highlight,
            color: discrete.color,
        }
    })
}

fn blend_arrows(
    before: &[ArrowAnnotation],
    after: &[ArrowAnnotation],
    progress: f64,
) -> Vec<Faded<ArrowAnnotation>> {
    blend_by_id(before, after, progress, |a| a.id.as_str(), |a, b, t| {
        let discrete = if t < 0.5 { a } else { b };
        ArrowAnnotation {
            id: a.id.clone(),
            from: <[f64; 2] as Lerp>::lerp(&a.from, &b.from, t),
            to: <[f64; 2] as Lerp>::lerp(&a.to, &b.to, t),
            color: discrete.color,
            label: discrete.label.clone(),
            dashed: discrete.dashed,
        }
    })
}

/// Pair entities of two keyframes by identity.
///
/// Entities in both frames are blended at full opacity; entities only in `before` fade out with
/// `1 - progress`; entities only in `after` fade in with `progress`.
fn blend_by_id<T: Clone>(
    before: &[T],
    after: &[T],
    progress: f64,
    id_of: impl Fn(&T) -> &str,
    blend: impl Fn(&T, &T, f64) -> T,
) -> Vec<Faded<T>> {
    let progress = clamp_unit(progress);
    let after_by_id: HashMap<&str, &T> = after.iter().map(|e| (id_of(e), e)).collect();

    let mut out = Vec::with_capacity(before.len().max(after.len()));
    let mut matched = HashSet::new();
    for b in before {
        let id = id_of(b);
        match after_by_id.get(id) {
            Some(a) => {
                matched.insert(id);
                out.push(Faded::opaque(blend(b, a, progress)));
            }
            None => out.push(Faded {
                value: b.clone(),
                opacity: 1.0 - progress,
            }),
        }
    }
    for a in after {
        if !matched.contains(id_of(a)) {
            out.push(Faded {
                value: a.clone(),
                opacity: progress,
            });
        }
    }
    out
}

/// Terms are windowed rather than blended.
///
/// A term from `before` is visible for its own `duration` after `before.timestamp`. A term only
/// in `after` fades in once `progress` crosses the late-entry threshold, and never while the same
/// key is still visible from `before`.
fn resolve_terms(
    before: &AnnotationFrame,
    after: &AnnotationFrame,
    t: f64,
    progress: f64,
    opts: &InterpolationOpts,
) -> Vec<FadedTerm> {
    let mut out = Vec::new();
    let mut visible = HashSet::new();

    for term in &before.terminology {
        let start = before.timestamp;
        let end = start + term.duration.max(0.0);
        if t < start || t > end || !visible.insert(term.key()) {
            continue;
        }
        out.push(FadedTerm {
            value: term.clone(),
            opacity: opts.fade_ease.window_opacity(t, start, end, opts.term_fade_s),
            start_time: start,
        });
    }

    if progress < opts.late_entry_threshold {
        return out;
    }
    let span = after.timestamp - before.timestamp;
    let entry = before.timestamp + opts.late_entry_threshold * span.max(0.0);
    let opacity = opts
        .fade_ease
        .window_opacity(t, entry, f64::INFINITY, opts.term_fade_s);
    for term in &after.terminology {
        if !visible.insert(term.key()) {
            continue;
        }
        out.push(FadedTerm {
            value: term.clone(),
            opacity,
            start_time: entry,
        });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/eval/interpolate.rs"]
mod tests;
