use std::collections::{HashMap, HashSet};

use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::{finite_or_zero, normalize_key};
use crate::layout::mapper::CanvasDimensions;
use crate::model::annotation::{Faded, FadedTerm, PlayerAnnotation};
use crate::model::vocab;

const SCORE_NEVER_SHOWN: i32 = 10;
const SCORE_CORE_TERM: i32 = 5;
const SCORE_NEAR_HIGHLIGHT: i32 = 2;
const SCORE_SAFE_ZONE: i32 = 1;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TermSchedulerOpts {
    pub max_terms_on_screen: usize,
    /// Seconds after a term was last shown during which it is not eligible again.
    pub cooldown_s: f64,
    /// Seconds a displayed term stays in the displayed set before auto-expiring.
    pub display_duration_s: f64,
    pub near_player_px: f64,
    /// Size of each corner safe zone as a fraction of the frame width/height.
    pub safe_zone_fraction: f64,
    pub collision_radius_px: f64,
    pub collision_penalty: i32,
}

impl Default for TermSchedulerOpts {
    fn default() -> Self {
        Self {
            max_terms_on_screen: 2,
            cooldown_s: 6.0,
            display_duration_s: 4.0,
            near_player_px: 150.0,
            safe_zone_fraction: 0.25,
            collision_radius_px: 120.0,
            collision_penalty: 3,
        }
    }
}

impl TermSchedulerOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        for (name, v) in [
            ("cooldown_s", self.cooldown_s),
            ("display_duration_s", self.display_duration_s),
            ("near_player_px", self.near_player_px),
            ("collision_radius_px", self.collision_radius_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GridmarkError::validation(format!(
                    "terminology.{name} must be finite and >= 0"
                )));
            }
        }
        if !(0.0..=0.5).contains(&self.safe_zone_fraction) {
            return Err(GridmarkError::validation(
                "terminology.safe_zone_fraction must be in [0, 0.5]",
            ));
        }
        if self.collision_penalty < 0 {
            return Err(GridmarkError::validation(
                "terminology.collision_penalty must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Display history of one term key.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TermHistory {
    pub last_shown: f64,
    pub times_shown: u32,
}

/// A candidate chosen for display in one decision.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SelectedTerm {
    pub key: String,
    pub term: FadedTerm,
    /// Anchor in viewport pixels.
    pub anchor: Point,
    pub score: i32,
}

/// Stateful scheduler deciding which terminology popups are shown.
///
/// Owns the per-play display history; one manager serves one play at a time and must be
/// [`reset`](Self::reset) when another play loads. Each call to
/// [`select_terms_to_display`](Self::select_terms_to_display) records history, so it must be
/// invoked once per decision rather than once per rendered frame.
#[derive(Clone, Debug)]
pub struct TerminologyOverlayManager {
    opts: TermSchedulerOpts,
    play_start: f64,
    seen: HashMap<String, TermHistory>,
    pinned: HashSet<String>,
    displayed: HashMap<String, f64>,
}

impl TerminologyOverlayManager {
    pub fn new(opts: TermSchedulerOpts, play_start: f64) -> Self {
        Self {
            opts,
            play_start: finite_or_zero(play_start),
            seen: HashMap::new(),
            pinned: HashSet::new(),
            displayed: HashMap::new(),
        }
    }

    pub fn opts(&self) -> &TermSchedulerOpts {
        &self.opts
    }

    pub fn play_start(&self) -> f64 {
        self.play_start
    }

    /// Forget all history, pins and displayed terms and start a new play.
    pub fn reset(&mut self, play_start: f64) {
        self.seen.clear();
        self.pinned.clear();
        self.displayed.clear();
        self.play_start = finite_or_zero(play_start);
        tracing::debug!(play_start = self.play_start, "terminology manager reset");
    }

    pub fn pin_term(&mut self, term: &str) {
        self.pinned.insert(normalize_key(term));
    }

    pub fn unpin_term(&mut self, term: &str) {
        self.pinned.remove(&normalize_key(term));
    }

    pub fn is_pinned(&self, term: &str) -> bool {
        self.pinned.contains(&normalize_key(term))
    }

    pub fn is_displayed(&self, term: &str) -> bool {
        self.displayed.contains_key(&normalize_key(term))
    }

    pub fn times_shown(&self, term: &str) -> u32 {
        self.seen
            .get(&normalize_key(term))
            .map_or(0, |h| h.times_shown)
    }

    pub fn history(&self, term: &str) -> Option<TermHistory> {
        self.seen.get(&normalize_key(term)).copied()
    }

    /// Displayed term keys with their display start, sorted by key.
    pub fn displayed_terms(&self) -> Vec<(&str, f64)> {
        let mut out: Vec<_> = self
            .displayed
            .iter()
            .map(|(k, start)| (k.as_str(), *start))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Drop displayed terms older than the display duration, unless pinned.
    ///
    /// Entries that started after `now` (the host seeked backwards) are dropped too.
    pub fn expire(&mut self, now: f64) {
        let now = self.clock(now);
        let duration = self.opts.display_duration_s;
        let pinned = &self.pinned;
        self.displayed.retain(|key, start| {
            let age = now - *start;
            pinned.contains(key) || (0.0..=duration).contains(&age)
        });
    }

    /// Whether `key` is still cooling down at `now`. Pinned terms never are.
    pub fn in_cooldown(&self, term: &str, now: f64) -> bool {
        let key = normalize_key(term);
        if self.pinned.contains(&key) {
            return false;
        }
        let now = self.clock(now);
        self.seen.get(&key).is_some_and(|h| {
            let elapsed = now - h.last_shown;
            elapsed >= 0.0 && elapsed < self.opts.cooldown_s
        })
    }

    /// Choose up to `max_terms_on_screen` candidates to show at `now` and record them as shown.
    pub fn select_terms_to_display(
        &mut self,
        candidates: &[FadedTerm],
        players: &[Faded<PlayerAnnotation>],
        dims: &CanvasDimensions,
        now: f64,
    ) -> Vec<SelectedTerm> {
        let limit = self.opts.max_terms_on_screen;
        self.select_terms_with_limit(candidates, players, dims, now, limit)
    }

    /// Like [`select_terms_to_display`](Self::select_terms_to_display) with a tighter cap, for
    /// callers that already keep some terms on screen.
    #[tracing::instrument(skip(self, candidates, players, dims), fields(n_candidates = candidates.len()))]
    pub fn select_terms_with_limit(
        &mut self,
        candidates: &[FadedTerm],
        players: &[Faded<PlayerAnnotation>],
        dims: &CanvasDimensions,
        now: f64,
        limit: usize,
    ) -> Vec<SelectedTerm> {
        let now = self.clock(now);
        self.expire(now);

        let limit = limit.min(self.opts.max_terms_on_screen);
        let highlighted: Vec<Point> = players
            .iter()
            .filter(|p| p.value.highlight && p.is_visible())
            .map(|p| dims.to_pixels(p.value.position()))
            .collect();

        let mut keys = HashSet::new();
        let mut pool: Vec<SelectedTerm> = Vec::new();
        for term in candidates {
            let key = term.value.key();
            if key.is_empty() || !keys.insert(key.clone()) {
                continue;
            }
            if self.in_cooldown(&key, now) {
                tracing::trace!(term = %key, "term in cooldown");
                continue;
            }
            let anchor = dims.to_pixels(term.value.position());
            let score = self.base_score(&key, anchor, &highlighted, dims);
            pool.push(SelectedTerm {
                key,
                term: term.clone(),
                anchor,
                score,
            });
        }

        let mut chosen: Vec<SelectedTerm> = Vec::new();
        while chosen.len() < limit && !pool.is_empty() {
            let mut best: Option<(usize, i32)> = None;
            for (idx, cand) in pool.iter().enumerate() {
                let score = cand.score - self.collision_penalty(cand.anchor, &chosen);
                if best.is_none_or(|(_, s)| score > s) {
                    best = Some((idx, score));
                }
            }
            let Some((idx, score)) = best else { break };
            let mut pick = pool.remove(idx);
            pick.score = score;
            chosen.push(pick);
        }

        for pick in &chosen {
            let entry = self.seen.entry(pick.key.clone()).or_insert(TermHistory {
                last_shown: now,
                times_shown: 0,
            });
            entry.last_shown = now;
            entry.times_shown += 1;
            self.displayed.entry(pick.key.clone()).or_insert(now);
            tracing::debug!(term = %pick.key, score = pick.score, now, "term selected");
        }
        chosen
    }

    fn base_score(
        &self,
        key: &str,
        anchor: Point,
        highlighted: &[Point],
        dims: &CanvasDimensions,
    ) -> i32 {
        let mut score = 0;
        if !self.seen.contains_key(key) {
            score += SCORE_NEVER_SHOWN;
        }
        if vocab::is_core_term(key) {
            score += SCORE_CORE_TERM;
        }
        if highlighted
            .iter()
            .any(|p| p.distance(anchor) <= self.opts.near_player_px)
        {
            score += SCORE_NEAR_HIGHLIGHT;
        }
        if in_safe_zone(anchor, dims.rect(), self.opts.safe_zone_fraction) {
            score += SCORE_SAFE_ZONE;
        }
        score
    }

    fn collision_penalty(&self, anchor: Point, chosen: &[SelectedTerm]) -> i32 {
        let near = chosen
            .iter()
            .filter(|c| c.anchor.distance(anchor) <= self.opts.collision_radius_px)
            .count();
        i32::try_from(near).unwrap_or(i32::MAX).saturating_mul(self.opts.collision_penalty)
    }

    fn clock(&self, now: f64) -> f64 {
        if now.is_finite() {
            now.max(self.play_start)
        } else {
            self.play_start
        }
    }
}

/// `true` when `p` lies in one of the four corner regions of `frame`.
fn in_safe_zone(p: Point, frame: Rect, fraction: f64) -> bool {
    let zw = frame.width() * fraction;
    let zh = frame.height() * fraction;
    let near_x = p.x <= frame.x0 + zw || p.x >= frame.x1 - zw;
    let near_y = p.y <= frame.y0 + zh || p.y >= frame.y1 - zh;
    near_x && near_y
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/terminology.rs"]
mod tests;
