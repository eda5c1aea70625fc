use thiserror::Error;
use watchlog_sources::StoreError;

use crate::validate::FieldError;

/// Failures of the entry workflow.
///
/// `Display` is the user-facing notice text. Collaborator details stay in
/// the source chain and in the logs.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error(transparent)]
    ValidationFailed(#[from] FieldError),

    #[error("Catalog lookup failed: {0}")]
    FallbackLookupFailed(String),

    #[error("Could not save your movie. Please try again.")]
    PersistenceFailed(#[source] StoreError),

    #[error("Movie list is not available right now.")]
    ListingUnavailable(#[source] StoreError),
}
