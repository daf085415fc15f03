use std::collections::HashSet;

use crate::foundation::core::PctPoint;
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::normalize_key;
use crate::model::annotation::{ArrowAnnotation, Faded, FadedTerm, PlayerAnnotation};
use crate::model::vocab::{self, LabelKind};

const SCORE_KEY_ACTOR: i32 = 10;
const SCORE_HIGHLIGHTED: i32 = 5;
const SCORE_CONCEPT: i32 = 10;
const SCORE_LABELED: i32 = 5;
const SCORE_CORE_TERM: i32 = 5;

/// Per-frame caps for broadcast-style density.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BroadcastOpts {
    pub max_circles: usize,
    pub max_arrows: usize,
    pub max_callouts: usize,
    pub max_micro_stories: usize,
}

impl Default for BroadcastOpts {
    fn default() -> Self {
        Self {
            max_circles: 4,
            max_arrows: 4,
            max_callouts: 4,
            max_micro_stories: 2,
        }
    }
}

impl BroadcastOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        if self.max_circles == 0 && self.max_arrows == 0 && self.max_callouts == 0 {
            return Err(GridmarkError::validation(
                "broadcast caps would hide every overlay",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutSource {
    Arrow,
    Terminology,
}

/// A short text label surfaced as its own overlay box.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BroadcastCallout {
    pub text: String,
    /// Anchor in percentage space.
    pub anchor: PctPoint,
    pub kind: LabelKind,
    pub score: i32,
    pub source: CalloutSource,
    pub opacity: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BroadcastFrame {
    pub players: Vec<Faded<PlayerAnnotation>>,
    pub arrows: Vec<Faded<ArrowAnnotation>>,
    pub terminology: Vec<FadedTerm>,
    pub callouts: Vec<BroadcastCallout>,
}

/// Cap a frame's overlays to broadcast density, ranking concept labels above everything else.
///
/// Every list is ordered by label kind (concept, other, position), then score descending, then
/// input order. Terminology only survives in learn mode.
pub fn filter_frame(
    players: &[Faded<PlayerAnnotation>],
    arrows: &[Faded<ArrowAnnotation>],
    terminology: &[FadedTerm],
    learn_mode: bool,
    opts: &BroadcastOpts,
) -> BroadcastFrame {
    let players = top_ranked(
        players.iter().filter_map(|p| {
            let key_actor_label = vocab::is_key_actor(&p.value.label);
            if !key_actor_label && !p.value.highlight {
                return None;
            }
            let mut score = 0;
            if key_actor_label {
                score += SCORE_KEY_ACTOR;
            }
            if p.value.highlight {
                score += SCORE_HIGHLIGHTED;
            }
            Some((vocab::classify_label(&p.value.label), score, p.clone()))
        }),
        opts.max_circles,
    );

    let arrows_out = top_ranked(
        arrows.iter().map(|a| {
            let (kind, score) = label_rank(a.value.label.as_deref());
            (kind, score, a.clone())
        }),
        opts.max_arrows,
    );

    let mut pooled = Vec::new();
    for a in arrows {
        if let Some(label) = a.value.label.as_deref() {
            let (kind, score) = label_rank(Some(label));
            pooled.push(BroadcastCallout {
                text: label.trim().to_string(),
                anchor: a.value.to,
                kind,
                score,
                source: CalloutSource::Arrow,
                opacity: a.opacity,
            });
        }
    }
    if learn_mode {
        for t in terminology {
            let kind = vocab::classify_label(&t.value.term);
            let mut score = 0;
            if kind == LabelKind::Concept {
                score += SCORE_CONCEPT;
            }
            if vocab::is_core_term(&t.value.term) {
                score += SCORE_CORE_TERM;
            }
            pooled.push(BroadcastCallout {
                text: t.value.term.trim().to_string(),
                anchor: t.value.position(),
                kind,
                score,
                source: CalloutSource::Terminology,
                opacity: t.opacity,
            });
        }
    }
    let mut texts = HashSet::new();
    pooled.retain(|c| {
        let key = normalize_key(&c.text);
        !key.is_empty() && texts.insert(key)
    });
    let callouts = top_ranked(
        pooled.into_iter().map(|c| (c.kind, c.score, c)),
        opts.max_callouts,
    );

    let terminology = if learn_mode {
        top_ranked(
            terminology
                .iter()
                .map(|t| (vocab::classify_label(&t.value.term), 0, t.clone())),
            opts.max_micro_stories,
        )
    } else {
        Vec::new()
    };

    tracing::trace!(
        players = players.len(),
        arrows = arrows_out.len(),
        callouts = callouts.len(),
        terms = terminology.len(),
        learn_mode,
        "broadcast filter"
    );

    BroadcastFrame {
        players,
        arrows: arrows_out,
        terminology,
        callouts,
    }
}

fn label_rank(label: Option<&str>) -> (LabelKind, i32) {
    let Some(label) = label.filter(|l| !l.trim().is_empty()) else {
        return (LabelKind::Other, 0);
    };
    let kind = vocab::classify_label(label);
    let mut score = SCORE_LABELED;
    if kind == LabelKind::Concept {
        score += SCORE_CONCEPT;
    }
    (kind, score)
}

/// Stable sort by `(kind, -score)` and keep the first `cap`.
fn top_ranked<T>(items: impl Iterator<Item = (LabelKind, i32, T)>, cap: usize) -> Vec<T> {
    let mut ranked: Vec<_> = items.collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    ranked.into_iter().take(cap).map(|(_, _, v)| v).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/broadcast.rs"]
mod tests;
