use thiserror::Error;

/// Failure to turn an environment into canonical bytes.
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("environment variable name is not valid unicode: {0}")]
    NonUnicodeName(String),

    #[error("value of environment variable `{0}` is not valid unicode")]
    NonUnicodeValue(String),

    #[error("value of `{name}` cannot be represented as text (found {kind})")]
    UnsupportedValue { name: String, kind: &'static str },

    #[error("environment must be an object of name/value pairs, found {kind}")]
    NotAnObject { kind: &'static str },

    #[error("failed to encode environment: {0}")]
    Encode(#[from] serde_json::Error),
}
