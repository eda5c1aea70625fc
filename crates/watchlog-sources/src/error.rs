use thiserror::Error;

/// Failure talking to an external HTTP collaborator
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("invalid response from {service}: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// Failure reported by the record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected the record (missing or out-of-range field)
    #[error("record rejected: {reason}")]
    Validation { reason: String },

    #[error("storage failure: {message}")]
    Storage { message: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}
