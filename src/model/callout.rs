use crate::foundation::core::PctPoint;

/// Minimum on-screen duration of an editorial callout, in seconds.
pub const MIN_CALLOUT_DURATION_S: f64 = 3.0;
/// Maximum number of editorial callouts per play.
pub const MAX_CALLOUTS_PER_PLAY: usize = 3;
pub const MAX_CALLOUT_TEXT_CHARS: usize = 50;
pub const MAX_CALLOUT_DETAIL_CHARS: usize = 200;

/// A long-lived, play-level explanatory overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditorialCallout {
    pub id: String,
    pub start_time: f64,
    /// Always `>= start_time + MIN_CALLOUT_DURATION_S` after ingestion.
    pub end_time: f64,
    pub text: String,
    #[serde(default)]
    pub detail: String,
    pub anchor: CalloutAnchor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<CalloutDecoration>,
}

impl EditorialCallout {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Inclusive on both ends.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.start_time <= t && t <= self.end_time
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalloutAnchor {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
}

/// Optional decoration drawn with a callout; at most one per callout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalloutDecoration {
    Circle { x: f64, y: f64, radius: f64 },
    Arrow { from: PctPoint, to: PctPoint },
}
