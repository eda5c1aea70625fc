use std::sync::Arc;
use std::time::Duration;
use watchlog_config::Config;
use watchlog_models::Suggestion;
use watchlog_sources::{CatalogSearch, MovieStore};

use crate::form::EntryForm;
use crate::listing::Listing;
use crate::search::SearchClient;
use crate::submission::{SubmissionOrchestrator, SubmissionOutcome, SubmitAction};
use crate::suggestions::{CursorDirection, CursorMove, SuggestionController, SuggestionView};
use crate::validate::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient, non-blocking message for the status region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The entry form wired to its suggestion list and submission pipeline.
///
/// Owns all per-form state; the rendering surface drives it through these
/// methods and reads back the form, the suggestion view, the field error,
/// the flash notice and the listing.
pub struct EntrySession {
    form: EntryForm,
    suggestions: SuggestionController,
    orchestrator: Arc<SubmissionOrchestrator>,
    field_error: Option<FieldError>,
    flash: Option<Notice>,
    listing: Option<Listing>,
}

impl EntrySession {
    pub fn new(suggestions: SuggestionController, orchestrator: Arc<SubmissionOrchestrator>) -> Self {
        Self {
            form: EntryForm::new(),
            suggestions,
            orchestrator,
            field_error: None,
            flash: None,
            listing: None,
        }
    }

    pub fn from_config(config: &Config, catalog: Arc<dyn CatalogSearch>, store: Arc<dyn MovieStore>) -> Self {
        let search = SearchClient::from_config(catalog, &config.catalog, &config.entry);
        let suggestions = SuggestionController::new(search.clone(), Duration::from_millis(config.entry.debounce_ms));
        let orchestrator = SubmissionOrchestrator::new(search, store, config.entry.variant, config.store.list_cap);
        Self::new(suggestions, Arc::new(orchestrator))
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn field_error(&self) -> Option<&FieldError> {
        self.field_error.as_ref()
    }

    pub fn flash(&self) -> Option<&Notice> {
        self.flash.as_ref()
    }

    pub fn listing(&self) -> Option<&Listing> {
        self.listing.as_ref()
    }

    pub fn suggestions(&self) -> SuggestionView {
        self.suggestions.view()
    }

    pub fn controller(&self) -> &SuggestionController {
        &self.suggestions
    }

    /// Title keystroke: update the field and schedule a suggestion search
    pub fn input_changed(&mut self, text: &str) {
        self.form.set_title(text);
        self.suggestions.on_input_changed(text);
    }

    pub fn move_cursor(&self, direction: CursorDirection) -> CursorMove {
        self.suggestions.move_cursor(direction)
    }

    /// Pointer selection of the suggestion at `index`
    pub fn select(&mut self, index: usize) -> Option<Suggestion> {
        self.suggestions.commit_selection(Some(index), &mut self.form)
    }

    /// Enter key: commit the suggestion under the cursor, if any
    pub fn enter(&mut self) -> Option<Suggestion> {
        self.suggestions.commit_selection(None, &mut self.form)
    }

    /// Focus left the title input and the suggestion list
    pub fn dismiss(&self) {
        self.suggestions.dismiss();
    }

    fn clear_entry(&mut self) {
        self.form.clear();
        self.field_error = None;
        self.suggestions.dismiss();
    }

    /// Run the submit pipeline and fold its outcome into the session.
    ///
    /// A saved entry clears the form; a failed one keeps every field so the
    /// user can retry.
    pub async fn submit(&mut self, action: SubmitAction) -> SubmissionOutcome {
        let outcome = self.orchestrator.submit(&self.form, action).await;
        self.field_error = None;

        match &outcome {
            SubmissionOutcome::Reset => {
                self.clear_entry();
                self.flash = None;
            }
            SubmissionOutcome::Busy => {
                self.flash = Some(Notice::new(NoticeLevel::Info, "Still saving the previous entry."));
            }
            SubmissionOutcome::Invalid(err) => {
                self.field_error = Some(err.clone());
            }
            SubmissionOutcome::Saved { movie, listing, .. } => {
                self.clear_entry();
                self.flash = Some(Notice::new(
                    NoticeLevel::Success,
                    format!("Saved \"{}\".", movie.record.title),
                ));
                self.listing = Some(listing.clone());
            }
            SubmissionOutcome::Failed { error, enrichment } => {
                // Keep what the user typed; adopt the catalog match so a retry skips the lookup
                if let Some(found) = enrichment {
                    self.form.apply_suggestion(found);
                }
                self.flash = Some(Notice::new(NoticeLevel::Error, error.to_string()));
            }
        }

        outcome
    }

    /// Re-read the listing from the store
    pub async fn refresh_listing(&mut self) -> &Listing {
        let listing = self.orchestrator.refresh_listing().await;
        self.listing.insert(listing)
    }

    /// Wait for the pending suggestion search, if any, to land
    pub async fn settled(&self) -> SuggestionView {
        self.suggestions.settled().await
    }
}
