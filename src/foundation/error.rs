/// Convenience result type used across gridmark.
pub type GridmarkResult<T> = Result<T, GridmarkError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-tick APIs never return errors; this type only surfaces at load time (ingestion,
/// configuration) and in the CLI.
#[derive(thiserror::Error, Debug)]
pub enum GridmarkError {
    /// Invalid user-provided configuration or option values.
    #[error("validation error: {0}")]
    Validation(String),

    /// The analysis document could not be ingested at all.
    #[error("ingest error: {0}")]
    Ingest(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GridmarkError {
    /// Build a [`GridmarkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GridmarkError::Ingest`] value.
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Build a [`GridmarkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GridmarkError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
