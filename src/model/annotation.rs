use crate::foundation::core::{PctPoint, Rgb8};
use crate::foundation::math::normalize_key;

/// A timestamped snapshot of annotation state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotationFrame {
    /// Keyframe time in seconds (`>= 0`).
    pub timestamp: f64,
    #[serde(default)]
    pub players: Vec<PlayerAnnotation>,
    #[serde(default)]
    pub arrows: Vec<ArrowAnnotation>,
    #[serde(default)]
    pub terminology: Vec<TerminologyAnnotation>,
}

/// A player marker. Identity across keyframes is `id`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerAnnotation {
    pub id: String,
    /// Percentage of frame width, `0..=100`.
    pub x: f64,
    /// Percentage of frame height, `0..=100`.
    pub y: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default)]
    pub color: Rgb8,
}

impl PlayerAnnotation {
    pub fn position(&self) -> PctPoint {
        [self.x, self.y]
    }
}

/// A movement arrow.
///
/// `id` is synthetic: raw analysis output carries no arrow identity, so ingestion assigns ids by
/// matching arrows between consecutive keyframes (see `ingest::arrow_ids`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArrowAnnotation {
    #[serde(default)]
    pub id: String,
    pub from: PctPoint,
    pub to: PctPoint,
    #[serde(default)]
    pub color: Rgb8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub dashed: bool,
}

/// An educational term popup attached to a keyframe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TerminologyAnnotation {
    pub x: f64,
    pub y: f64,
    pub term: String,
    #[serde(default)]
    pub definition: String,
    /// Seconds the term remains visible after its keyframe.
    pub duration: f64,
}

impl TerminologyAnnotation {
    /// Case- and whitespace-insensitive identity of the term.
    pub fn key(&self) -> String {
        normalize_key(&self.term)
    }

    pub fn position(&self) -> PctPoint {
        [self.x, self.y]
    }
}

/// An entity copied out of a keyframe with an interpolated opacity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Faded<T> {
    #[serde(flatten)]
    pub value: T,
    /// `0..=1`.
    pub opacity: f64,
}

impl<T> Faded<T> {
    pub fn opaque(value: T) -> Self {
        Self {
            value,
            opacity: 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// A terminology popup resolved for a query time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FadedTerm {
    #[serde(flatten)]
    pub value: TerminologyAnnotation,
    pub opacity: f64,
    /// Time at which this term's fade-in began.
    pub start_time: f64,
}

/// Per-tick interpolation output. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct InterpolatedFrame {
    /// Query time this frame was built for.
    pub time: f64,
    /// Progress between the bracketing keyframes (`1.0` when a keyframe was returned verbatim).
    pub progress: f64,
    pub players: Vec<Faded<PlayerAnnotation>>,
    pub arrows: Vec<Faded<ArrowAnnotation>>,
    pub terminology: Vec<FadedTerm>,
}

impl InterpolatedFrame {
    /// Every entity of `frame` at full opacity.
    pub fn verbatim(frame: &AnnotationFrame, time: f64) -> Self {
        Self {
            time,
            progress: 1.0,
            players: frame.players.iter().cloned().map(Faded::opaque).collect(),
            arrows: frame.arrows.iter().cloned().map(Faded::opaque).collect(),
            terminology: frame
                .terminology
                .iter()
                .map(|t| FadedTerm {
                    value: t.clone(),
                    opacity: 1.0,
                    start_time: frame.timestamp,
                })
                .collect(),
        }
    }
}
