use thiserror::Error;

/// Failures surfaced by rendering. Text renders cannot fail; only encoding
/// the property set as JSON can.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
