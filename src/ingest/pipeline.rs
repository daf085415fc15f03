use serde_json::Value;

use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::ingest::arrow_ids::assign_arrow_ids;
use crate::ingest::callouts::{CalloutRules, schedule_callouts};
use crate::ingest::parse::{Rejection, number, parse_callout, parse_frame};
use crate::model::play::PlayAnalysis;

/// Options for turning raw analysis output into a [`PlayAnalysis`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IngestOpts {
    /// Duration given to terminology entries that omit one (seconds).
    pub default_term_duration_s: f64,
    /// Largest endpoint displacement (percentage units) still treated as the same arrow.
    pub arrow_match_radius: f64,
    pub callouts: CalloutRules,
}

impl Default for IngestOpts {
    fn default() -> Self {
        Self {
            default_term_duration_s: 3.0,
            arrow_match_radius: 12.0,
            callouts: CalloutRules::default(),
        }
    }
}

impl IngestOpts {
    pub fn validate(&self) -> GridmarkResult<()> {
        if !self.default_term_duration_s.is_finite() || self.default_term_duration_s <= 0.0 {
            return Err(GridmarkError::validation(
                "ingest.default_term_duration_s must be finite and > 0",
            ));
        }
        if !self.arrow_match_radius.is_finite() || self.arrow_match_radius < 0.0 {
            return Err(GridmarkError::validation(
                "ingest.arrow_match_radius must be finite and >= 0",
            ));
        }
        self.callouts.validate()
    }
}

/// Result of ingesting one analysis document.
#[derive(Clone, Debug, serde::Serialize)]
pub struct IngestReport {
    pub analysis: PlayAnalysis,
    /// Items dropped during ingestion, in document order per phase.
    pub rejections: Vec<Rejection>,
}

/// Parse, sanitize and schedule a raw analysis document.
///
/// Only document-level problems are errors (root not an object, missing or non-positive
/// `video_duration`). Invalid frames, entities and callouts are dropped and reported as
/// [`Rejection`]s.
#[tracing::instrument(skip(raw, opts))]
pub fn load_play(raw: &Value, opts: &IngestOpts) -> GridmarkResult<IngestReport> {
    let root = raw
        .as_object()
        .ok_or_else(|| GridmarkError::ingest("analysis document must be a JSON object"))?;
    let video_duration = number(root, "video_duration")
        .filter(|d| *d > 0.0)
        .ok_or_else(|| GridmarkError::ingest("video_duration must be a positive number"))?;
    let video_url = root
        .get("video_url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut rejections = Vec::new();

    let mut frames = Vec::new();
    if let Some(raw_frames) = root.get("frames").and_then(Value::as_array) {
        for (i, v) in raw_frames.iter().enumerate() {
            match parse_frame(
                v,
                &format!("$.frames[{i}]"),
                opts.default_term_duration_s,
                &mut rejections,
            ) {
                Ok(f) => frames.push(f),
                Err(r) => rejections.push(r),
            }
        }
    }
    frames.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    assign_arrow_ids(&mut frames, opts.arrow_match_radius);

    let mut proposed = Vec::new();
    if let Some(raw_callouts) = root.get("callouts").and_then(Value::as_array) {
        for (i, v) in raw_callouts.iter().enumerate() {
            match parse_callout(v, &format!("$.callouts[{i}]")) {
                Ok(c) => proposed.push(c),
                Err(r) => rejections.push(r),
            }
        }
    }
    let callouts = schedule_callouts(proposed, video_duration, &opts.callouts, &mut rejections);

    for r in &rejections {
        tracing::warn!(rejection = %r, "dropped analysis item");
    }
    tracing::debug!(
        frames = frames.len(),
        callouts = callouts.len(),
        rejected = rejections.len(),
        "ingested play"
    );

    Ok(IngestReport {
        analysis: PlayAnalysis {
            video_url,
            video_duration,
            frames,
            callouts,
        },
        rejections,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/pipeline.rs"]
mod tests;
