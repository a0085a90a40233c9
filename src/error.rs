use thiserror::Error;

/// Fatal skin package errors. Per-leaf validation failures are not errors;
/// those trait tuples are simply skipped during parsing.
#[derive(Debug, Error)]
pub enum SkinError {
    #[error("invalid skin JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing or invalid `{0}` field in skin metadata")]
    MissingField(&'static str),

    #[error("skin defines no usable representations")]
    NoRepresentations,
}
