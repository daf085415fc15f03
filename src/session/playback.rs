use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::eval::callouts::active_callouts;
use crate::eval::interpolate::interpolate;
use crate::foundation::core::{Point, Rgb8, Size};
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::foundation::math::finite_or_zero;
use crate::layout::mapper::CanvasDimensions;
use crate::layout::placement::{PlacedBox, place_box, preferred_placement};
use crate::layout::text_box::estimate_box_size;
use crate::model::annotation::{
    ArrowAnnotation, Faded, FadedTerm, InterpolatedFrame, PlayerAnnotation,
};
use crate::model::callout::{CalloutDecoration, EditorialCallout};
use crate::model::play::PlayAnalysis;
use crate::overlay::broadcast::{BroadcastCallout, CalloutSource, filter_frame};
use crate::overlay::terminology::{SelectedTerm, TerminologyOverlayManager};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Run every tick through the broadcast density filter.
    pub broadcast_style: bool,
    /// A forward jump larger than this (seconds) counts as a seek.
    pub seek_threshold_s: f64,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            broadcast_style: false,
            seek_threshold_s: 0.5,
        }
    }
}

impl SessionOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        if !self.seek_threshold_s.is_finite() || self.seek_threshold_s <= 0.0 {
            return Err(GridmarkError::validation(
                "session.seek_threshold_s must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// A text box placed next to its anchor, in viewport pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayBox {
    pub anchor: Point,
    #[serde(flatten)]
    pub placed: PlacedBox,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlayerMarker {
    pub id: String,
    pub position: Point,
    pub label: String,
    pub highlight: bool,
    pub color: Rgb8,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArrowMarker {
    pub id: String,
    pub from: Point,
    pub to: Point,
    pub color: Rgb8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub dashed: bool,
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TermOverlay {
    pub key: String,
    pub term: String,
    pub definition: String,
    pub opacity: f64,
    pub start_time: f64,
    pub pinned: bool,
    #[serde(rename = "box")]
    pub bounds: OverlayBox,
}

/// A broadcast-style label box.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LabelOverlay {
    pub text: String,
    pub source: CalloutSource,
    pub opacity: f64,
    #[serde(rename = "box")]
    pub bounds: OverlayBox,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecorationMarker {
    Circle { center: Point, radius: f64 },
    Arrow { from: Point, to: Point },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EditorialOverlay {
    pub id: String,
    pub text: String,
    pub detail: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(rename = "box")]
    pub bounds: OverlayBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoration: Option<DecorationMarker>,
}

/// Everything to draw for one tick, in viewport pixels. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct OverlayFrame {
    pub time: f64,
    pub progress: f64,
    pub players: Vec<PlayerMarker>,
    pub arrows: Vec<ArrowMarker>,
    pub terms: Vec<TermOverlay>,
    pub labels: Vec<LabelOverlay>,
    pub callouts: Vec<EditorialOverlay>,
}

/// Drives the engine for one loaded play, one tick at a time.
///
/// Owns the terminology manager and decides when it is consulted: only when the set of candidate
/// terms changes or the host seeks. In between, the previous selection is kept while its terms
/// remain displayed.
#[derive(Debug)]
pub struct PlaybackSession {
    config: EngineConfig,
    analysis: PlayAnalysis,
    terminology: TerminologyOverlayManager,
    last_time: Option<f64>,
    last_candidates: BTreeSet<String>,
    selected: Vec<SelectedTerm>,
}

impl PlaybackSession {
    /// Fails when `config` does not pass [`EngineConfig::validate`].
    pub fn new(analysis: PlayAnalysis, config: EngineConfig) -> GridmarkResult<Self> {
        config.validate()?;
        let terminology =
            TerminologyOverlayManager::new(config.terminology.clone(), analysis.play_start());
        Ok(Self {
            config,
            analysis,
            terminology,
            last_time: None,
            last_candidates: BTreeSet::new(),
            selected: Vec::new(),
        })
    }

    /// Replace the current play. Terminology history never leaks across plays.
    #[tracing::instrument(skip_all, fields(video_url = %analysis.video_url))]
    pub fn load_play(&mut self, analysis: PlayAnalysis) {
        self.terminology.reset(analysis.play_start());
        self.analysis = analysis;
        self.last_time = None;
        self.last_candidates.clear();
        self.selected.clear();
    }

    pub fn analysis(&self) -> &PlayAnalysis {
        &self.analysis
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn terminology(&self) -> &TerminologyOverlayManager {
        &self.terminology
    }

    /// Pin/unpin access for learn mode.
    pub fn terminology_mut(&mut self) -> &mut TerminologyOverlayManager {
        &mut self.terminology
    }

    /// Compute the overlay for playback time `t` in a viewport described by `dims`.
    pub fn tick(&mut self, t: f64, dims: &CanvasDimensions, learn_mode: bool) -> OverlayFrame {
        let t = finite_or_zero(t);
        let frame = interpolate(&self.analysis.frames, t, &self.config.interpolation)
            .unwrap_or_else(|| InterpolatedFrame {
                time: t,
                ..InterpolatedFrame::default()
            });

        let terms = self.decide_terms(&frame, dims, t);

        let (players, arrows, terms, labels) = if self.config.session.broadcast_style {
            let filtered = filter_frame(
                &frame.players,
                &frame.arrows,
                &terms,
                learn_mode,
                &self.config.broadcast,
            );
            (
                filtered.players,
                filtered.arrows,
                filtered.terminology,
                filtered.callouts,
            )
        } else {
            (frame.players, frame.arrows, terms, Vec::new())
        };

        let callouts = active_callouts(&self.analysis.callouts, t)
            .into_iter()
            .map(|c| self.editorial_overlay(c, &players, dims))
            .collect();

        OverlayFrame {
            time: t,
            progress: frame.progress,
            players: players.iter().map(|p| player_marker(p, dims)).collect(),
            arrows: arrows.iter().map(|a| arrow_marker(a, dims)).collect(),
            terms: terms.iter().map(|term| self.term_overlay(term, dims)).collect(),
            labels: labels.iter().map(|l| self.label_overlay(l, dims)).collect(),
            callouts,
        }
    }

    /// Terms to show at `t`: the still-displayed part of the previous selection, topped up by the
    /// manager when the candidate set changed or the host seeked.
    fn decide_terms(
        &mut self,
        frame: &InterpolatedFrame,
        dims: &CanvasDimensions,
        t: f64,
    ) -> Vec<FadedTerm> {
        // Zero-opacity terms stay candidates: a term handed off between keyframes restarts its
        // fade at the boundary and must keep its place on screen.
        let candidates = frame.terminology.clone();
        let keys: BTreeSet<String> = candidates.iter().map(|term| term.value.key()).collect();

        let seek = self
            .last_time
            .is_some_and(|prev| t < prev || t - prev > self.config.session.seek_threshold_s);
        let changed = self.last_time.is_none() || keys != self.last_candidates;

        self.terminology.expire(t);
        let mut kept: Vec<SelectedTerm> = Vec::new();
        for prev in &self.selected {
            if !self.terminology.is_displayed(&prev.key) {
                continue;
            }
            if let Some(current) = candidates.iter().find(|c| c.value.key() == prev.key) {
                kept.push(SelectedTerm {
                    term: current.clone(),
                    anchor: dims.to_pixels(current.value.position()),
                    ..prev.clone()
                });
            }
        }

        let max = self.terminology.opts().max_terms_on_screen;
        if (seek || changed) && kept.len() < max {
            let fresh: Vec<FadedTerm> = candidates
                .iter()
                .filter(|c| kept.iter().all(|k| k.key != c.value.key()))
                .cloned()
                .collect();
            let added = self.terminology.select_terms_with_limit(
                &fresh,
                &frame.players,
                dims,
                t,
                max - kept.len(),
            );
            tracing::debug!(t, seek, kept = kept.len(), added = added.len(), "terminology decision");
            kept.extend(added);
        }

        self.last_time = Some(t);
        self.last_candidates = keys;
        self.selected = kept;
        self.selected.iter().map(|s| s.term.clone()).collect()
    }

    fn place(&self, text: &str, anchor: Point, dims: &CanvasDimensions) -> OverlayBox {
        let estimated = estimate_box_size(text, &self.config.text_box);
        let size = Size::new(
            estimated.width.min(dims.width),
            estimated.height.min(dims.height),
        );
        let preferred = preferred_placement(anchor, dims);
        OverlayBox {
            anchor,
            placed: place_box(anchor, size, dims, preferred, &self.config.placement),
        }
    }

    fn term_overlay(&self, term: &FadedTerm, dims: &CanvasDimensions) -> TermOverlay {
        let value = &term.value;
        let text = if value.definition.trim().is_empty() {
            value.term.clone()
        } else {
            format!("{}\n{}", value.term, value.definition)
        };
        TermOverlay {
            key: value.key(),
            term: value.term.clone(),
            definition: value.definition.clone(),
            opacity: term.opacity,
            start_time: term.start_time,
            pinned: self.terminology.is_pinned(&value.term),
            bounds: self.place(&text, dims.to_pixels(value.position()), dims),
        }
    }

    fn label_overlay(&self, label: &BroadcastCallout, dims: &CanvasDimensions) -> LabelOverlay {
        LabelOverlay {
            text: label.text.clone(),
            source: label.source,
            opacity: label.opacity,
            bounds: self.place(&label.text, dims.to_pixels(label.anchor), dims),
        }
    }

    /// Callouts tied to a player follow that player's interpolated position while it is visible.
    fn editorial_overlay(
        &self,
        callout: &EditorialCallout,
        players: &[Faded<PlayerAnnotation>],
        dims: &CanvasDimensions,
    ) -> EditorialOverlay {
        let anchor_pct = callout
            .anchor
            .player_id
            .as_deref()
            .and_then(|id| players.iter().find(|p| p.value.id == id && p.is_visible()))
            .map_or([callout.anchor.x, callout.anchor.y], |p| p.value.position());
        let decoration = callout.decoration.map(|d| match d {
            CalloutDecoration::Circle { x, y, radius } => DecorationMarker::Circle {
                center: dims.to_pixels([x, y]),
                radius: dims.pct_width_to_px(radius).max(0.0),
            },
            CalloutDecoration::Arrow { from, to } => DecorationMarker::Arrow {
                from: dims.to_pixels(from),
                to: dims.to_pixels(to),
            },
        });
        EditorialOverlay {
            id: callout.id.clone(),
            text: callout.text.clone(),
            detail: callout.detail.clone(),
            start_time: callout.start_time,
            end_time: callout.end_time,
            bounds: self.place(&callout.text, dims.to_pixels(anchor_pct), dims),
            decoration,
        }
    }
}

fn player_marker(p: &Faded<PlayerAnnotation>, dims: &CanvasDimensions) -> PlayerMarker {
    PlayerMarker {
        id: p.value.id.clone(),
        position: dims.to_pixels(p.value.position()),
        label: p.value.label.clone(),
        highlight: p.value.highlight,
        color: p.value.color,
        opacity: p.opacity,
    }
}

fn arrow_marker(a: &Faded<ArrowAnnotation>, dims: &CanvasDimensions) -> ArrowMarker {
    ArrowMarker {
        id: a.value.id.clone(),
        from: dims.to_pixels(a.value.from),
        to: dims.to_pixels(a.value.to),
        color: a.value.color,
        label: a.value.label.clone(),
        dashed: a.value.dashed,
        opacity: a.opacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/playback.rs"]
mod tests;
