use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("pattern load failed for `{location}`: {reason}")]
    PatternLoad { location: String, reason: String },

    #[error("pattern load for `{location}` timed out after {timeout_ms}ms")]
    PatternTimeout { location: String, timeout_ms: u64 },

    #[error("renderer failure: {0}")]
    Renderer(String),
}
