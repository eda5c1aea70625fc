pub mod debounce;
pub mod error;
pub mod form;
pub mod listing;
pub mod normalize;
pub mod search;
pub mod session;
pub mod submission;
pub mod suggestions;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use debounce::Debouncer;
pub use error::EntryError;
pub use form::EntryForm;
pub use listing::Listing;
pub use search::{SearchClient, SearchOutcome, SearchStatus};
pub use session::{EntrySession, Notice, NoticeLevel};
pub use submission::{SubmissionOrchestrator, SubmissionOutcome, SubmissionState, SubmitAction};
pub use suggestions::{CursorDirection, CursorMove, SuggestionController, SuggestionView};
pub use validate::FieldError;
