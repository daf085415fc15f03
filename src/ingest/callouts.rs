use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::truncate_chars;
use crate::ingest::parse::Rejection;
use crate::model::callout::{
    EditorialCallout, MAX_CALLOUT_DETAIL_CHARS, MAX_CALLOUT_TEXT_CHARS, MAX_CALLOUTS_PER_PLAY,
    MIN_CALLOUT_DURATION_S,
};
use crate::model::vocab::{claims_causality, mentions_action_concept, mentions_setup_term};

/// Slack for float noise in authored times (`5.1 - 2.1 < 3.0`).
const TIME_EPS_S: f64 = 1e-9;

/// Play-level rules for editorial callouts.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CalloutRules {
    /// At most [`MAX_CALLOUTS_PER_PLAY`].
    pub max_callouts: usize,
    /// At least [`MIN_CALLOUT_DURATION_S`].
    pub min_duration_s: f64,
    /// Gap forced between the end of one callout and the start of the next.
    pub stagger_gap_s: f64,
    pub max_text_chars: usize,
    pub max_detail_chars: usize,
}

impl Default for CalloutRules {
    fn default() -> Self {
        Self {
            max_callouts: MAX_CALLOUTS_PER_PLAY,
            min_duration_s: MIN_CALLOUT_DURATION_S,
            stagger_gap_s: 1.0,
            max_text_chars: MAX_CALLOUT_TEXT_CHARS,
            max_detail_chars: MAX_CALLOUT_DETAIL_CHARS,
        }
    }
}

impl CalloutRules {
    pub fn validate(&self) -> GridmarkResult<()> {
        if self.max_callouts > MAX_CALLOUTS_PER_PLAY {
            return Err(GridmarkError::validation(format!(
                "callouts.max_callouts must be <= {MAX_CALLOUTS_PER_PLAY}"
            )));
        }
        if !self.min_duration_s.is_finite() || self.min_duration_s < MIN_CALLOUT_DURATION_S {
            return Err(GridmarkError::validation(format!(
                "callouts.min_duration_s must be >= {MIN_CALLOUT_DURATION_S}"
            )));
        }
        if !self.stagger_gap_s.is_finite() || self.stagger_gap_s < 0.0 {
            return Err(GridmarkError::validation(
                "callouts.stagger_gap_s must be finite and >= 0",
            ));
        }
        if self.max_text_chars > MAX_CALLOUT_TEXT_CHARS
            || self.max_detail_chars > MAX_CALLOUT_DETAIL_CHARS
        {
            return Err(GridmarkError::validation(format!(
                "callout text/detail limits must be <= {MAX_CALLOUT_TEXT_CHARS}/{MAX_CALLOUT_DETAIL_CHARS}"
            )));
        }
        Ok(())
    }
}

/// Concept relevance used to decide which callouts survive the per-play cap.
///
/// Action/outcome concepts win over setup vocabulary (formations) unless the detail claims a
/// causal link to the outcome.
pub fn score_callout(c: &EditorialCallout) -> i32 {
    let both = format!("{} {}", c.text, c.detail);
    let causal = claims_causality(&c.detail);
    let mut score = 0;
    if mentions_action_concept(&both) {
        score += 10;
    }
    if causal {
        score += 5;
    }
    if mentions_setup_term(&both) && !causal {
        score -= 5;
    }
    score
}

/// Enforce the play-level callout invariants on parsed callouts.
///
/// Output is sorted by `start_time`; every callout lasts at least `min_duration_s`, consecutive
/// callouts are separated by at least `stagger_gap_s`, and at most `max_callouts` remain. Dropped
/// callouts are reported through `rejections`. Fewer than `max_callouts` survivors is acceptable;
/// nothing is backfilled.
pub fn schedule_callouts(
    proposed: Vec<EditorialCallout>,
    video_duration: f64,
    rules: &CalloutRules,
    rejections: &mut Vec<Rejection>,
) -> Vec<EditorialCallout> {
    let video_duration = video_duration.max(0.0);

    let mut valid = Vec::with_capacity(proposed.len());
    for mut c in proposed {
        c.start_time = c.start_time.clamp(0.0, video_duration);
        c.end_time = c.end_time.clamp(0.0, video_duration);
        let duration = c.end_time - c.start_time;
        if duration + TIME_EPS_S < rules.min_duration_s {
            rejections.push(Rejection::TooShort {
                id: c.id,
                duration,
                min: rules.min_duration_s,
            });
            continue;
        }
        c.text = truncate_chars(&c.text, rules.max_text_chars);
        c.detail = truncate_chars(&c.detail, rules.max_detail_chars);
        valid.push(c);
    }

    if valid.len() > rules.max_callouts {
        let mut ranked = valid
            .into_iter()
            .enumerate()
            .map(|(i, c)| (score_callout(&c), i, c))
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(a.2.start_time.total_cmp(&b.2.start_time))
                .then(a.1.cmp(&b.1))
        });
        let over = ranked.split_off(rules.max_callouts);
        rejections.extend(over.into_iter().map(|(_, _, c)| Rejection::OverCap {
            id: c.id,
            cap: rules.max_callouts,
        }));
        valid = ranked.into_iter().map(|(_, _, c)| c).collect();
    }

    valid.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut scheduled: Vec<EditorialCallout> = Vec::with_capacity(valid.len());
    for mut c in valid {
        let duration = (c.end_time - c.start_time).max(rules.min_duration_s);
        if let Some(prev) = scheduled.last() {
            c.start_time = c.start_time.max(prev.end_time + rules.stagger_gap_s);
        }
        let end_time = c.start_time + duration;
        if end_time > video_duration + TIME_EPS_S {
            rejections.push(Rejection::NoRoomAfterStagger { id: c.id });
            continue;
        }
        c.end_time = end_time.min(video_duration);
        scheduled.push(c);
    }
    scheduled
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/callouts.rs"]
mod tests;
