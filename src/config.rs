use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::eval::interpolate::InterpolationOpts;
use crate::foundation::error::{GridmarkError, GridmarkResult};
use crate::ingest::IngestOpts;
use crate::layout::placement::PlacementOpts;
use crate::layout::text_box::TextBoxOpts;
use crate::overlay::broadcast::BroadcastOpts;
use crate::overlay::terminology::TermSchedulerOpts;
use crate::session::playback::SessionOpts;

/// All tunables of the engine, grouped by component.
///
/// Every section is optional in JSON and falls back to its defaults, so `{}` is a valid config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub ingest: IngestOpts,
    pub interpolation: InterpolationOpts,
    pub terminology: TermSchedulerOpts,
    pub broadcast: BroadcastOpts,
    pub placement: PlacementOpts,
    pub text_box: TextBoxOpts,
    pub session: SessionOpts,
}

impl EngineConfig {
    pub fn validate(&self) -> GridmarkResult<()> {
        self.ingest.validate()?;
        self.interpolation.validate()?;
        self.terminology.validate()?;
        self.broadcast.validate()?;
        self.placement.validate()?;
        self.text_box.validate()?;
        self.session.validate()
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json_str(s: &str) -> GridmarkResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> GridmarkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GridmarkError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| GridmarkError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
