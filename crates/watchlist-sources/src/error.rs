use thiserror::Error;

/// Failures talking to the metadata API or the document store
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {service} failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The store rejected a write because the supplied revision is stale
    #[error("document {id} was modified since revision {rev}")]
    Conflict { id: String, rev: String },

    #[error("failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    #[error("invalid {service} URL: {message}")]
    InvalidUrl {
        service: &'static str,
        message: String,
    },
}

impl ClientError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ClientError::Conflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
