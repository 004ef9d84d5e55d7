use thiserror::Error;

/// Errors surfaced by the opt-in checks and by JSON ingestion.
///
/// Mutators never fail: invalid geometry handed to them is silently skipped.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map is invalid: {}", .0.join(" "))]
    InvalidMap(Vec<String>),

    #[error("faces are invalid: {}", .0.join(" "))]
    InvalidFaces(Vec<String>),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported map version {0}")]
    Version(u64),

    #[error("too many {what}: {got} (max {max})")]
    Limit { what: &'static str, max: usize, got: usize },

    #[error("edge {index} has a non-finite or out-of-range coordinate")]
    BadCoordinate { index: usize },
}
