//! Gridmark resolves time-varying football play annotations into per-tick overlays.
//!
//! Analysis output arrives as sparse keyframes plus a handful of editorial callouts. The engine:
//!
//! - Ingests the raw JSON once into a typed [`PlayAnalysis`] ([`load_play`])
//! - Interpolates keyframes at any playback time ([`interpolate`])
//! - Schedules which terminology popups appear ([`TerminologyOverlayManager`])
//! - Optionally caps density in broadcast style ([`filter_frame`])
//! - Places every text box inside the video frame ([`place_box`])
//!
//! [`PlaybackSession`] wires these together for a host that calls [`PlaybackSession::tick`] once
//! per rendered frame.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
/// Engine-wide configuration.
pub mod config;
pub(crate) mod eval;
pub(crate) mod ingest;
pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod overlay;
pub(crate) mod session;

pub use crate::foundation::core::{PctPoint, Point, Rect, Rgb8, Size, Vec2};
pub use crate::foundation::error::{GridmarkError, GridmarkResult};

pub use crate::animation::ease::Ease;
pub use crate::config::EngineConfig;
pub use crate::eval::callouts::active_callouts;
pub use crate::eval::interpolate::{InterpolationOpts, interpolate};
pub use crate::ingest::{
    CalloutRules, IngestOpts, IngestReport, Rejection, load_play, schedule_callouts,
    score_callout,
};
pub use crate::layout::mapper::CanvasDimensions;
pub use crate::layout::placement::{
    PlacedBox, Placement, PlacementOpts, place_box, preferred_placement,
};
pub use crate::layout::text_box::{TextBoxOpts, estimate_box_size};
pub use crate::model::annotation::{
    AnnotationFrame, ArrowAnnotation, Faded, FadedTerm, InterpolatedFrame, PlayerAnnotation,
    TerminologyAnnotation,
};
pub use crate::model::callout::{
    CalloutAnchor, CalloutDecoration, EditorialCallout, MAX_CALLOUT_DETAIL_CHARS,
    MAX_CALLOUT_TEXT_CHARS, MAX_CALLOUTS_PER_PLAY, MIN_CALLOUT_DURATION_S,
};
pub use crate::model::play::PlayAnalysis;
pub use crate::model::vocab;
pub use crate::overlay::broadcast::{
    BroadcastCallout, BroadcastFrame, BroadcastOpts, CalloutSource, filter_frame,
};
pub use crate::overlay::terminology::{
    SelectedTerm, TermHistory, TermSchedulerOpts, TerminologyOverlayManager,
};
pub use crate::session::playback::{
    ArrowMarker, DecorationMarker, EditorialOverlay, LabelOverlay, OverlayBox, OverlayFrame,
    PlaybackSession, PlayerMarker, SessionOpts, TermOverlay,
};
