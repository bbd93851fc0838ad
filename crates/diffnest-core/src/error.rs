//! Error types for decoding and patch rendering.

use thiserror::Error;

/// Errors that can occur while decoding input documents or rendering output.
///
/// Comparison itself never fails; only the format layer returns these.
#[derive(Error, Debug)]
pub enum DiffnestError {
    /// The input was not a valid JSON document stream.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The input was not a valid YAML document stream.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// The requested input format is recognised but not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The JSON patch could not be serialized.
    #[error("patch serialization error: {0}")]
    Patch(String),
}

/// Convenience alias used throughout diffnest-core.
pub type Result<T> = std::result::Result<T, DiffnestError>;
