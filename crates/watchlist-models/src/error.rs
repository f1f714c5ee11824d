use thiserror::Error;

/// Errors raised while decoding user-supplied identifiers and values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("media type '{0}' is not valid (expected 'movie' or 'tv')")]
    InvalidMediaType(String),

    #[error("'{0}' is not a numeric id")]
    InvalidId(String),

    #[error("status '{0}' is not a known watch status")]
    InvalidStatus(String),

    #[error("'{0}' is not a valid document reference (expected '<id>.<revision>')")]
    InvalidDocRef(String),

    #[error("{media_type} {id} has no '{field}' field")]
    MissingField {
        media_type: String,
        id: u64,
        field: &'static str,
    },
}
