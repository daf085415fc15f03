use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::ingest::{IngestOpts, IngestReport, load_play};
use crate::model::annotation::AnnotationFrame;
use crate::model::callout::EditorialCallout;

/// Everything the analysis collaborator produced for one play, after ingestion.
///
/// `frames` are sorted by timestamp, arrows carry synthetic ids, and `callouts` satisfy the
/// play-level invariants (at most 3, each at least 3s long, no overlap).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayAnalysis {
    #[serde(default)]
    pub video_url: String,
    /// Video length in seconds.
    pub video_duration: f64,
    #[serde(default)]
    pub frames: Vec<AnnotationFrame>,
    #[serde(default)]
    pub callouts: Vec<EditorialCallout>,
}

impl PlayAnalysis {
    /// Ingest a raw analysis document from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R, opts: &IngestOpts) -> GridmarkResult<IngestReport> {
        let raw: serde_json::Value = serde_json::from_reader(r)
            .map_err(|e| GridmarkError::serde(format!("parse analysis JSON: {e}")))?;
        load_play(&raw, opts)
    }

    /// Ingest a raw analysis document from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>, opts: &IngestOpts) -> GridmarkResult<IngestReport> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridmarkError::ingest(format!("open analysis JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f), opts)
    }

    /// Timestamp of the first keyframe, or `0` for a play without keyframes.
    pub fn play_start(&self) -> f64 {
        self.frames.first().map_or(0.0, |f| f.timestamp)
    }
}
