//! One submission attempt of the entry form.
//!
//! `Idle -> Validating -> (Invalid | FallbackLookup) -> Submitting ->
//! (Succeeded | Failed) -> Idle`. Validation short-circuits on the first
//! failing field and never touches the network. The fallback lookup only
//! runs when no suggestion was chosen, and its failure is not fatal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use watchlog_models::{FormVariant, NormalizedRecord, PersistedMovie, Suggestion};
use watchlog_sources::MovieStore;

use crate::error::EntryError;
use crate::form::EntryForm;
use crate::listing::{fetch_listing, Listing};
use crate::normalize::build_record;
use crate::search::{SearchClient, SearchStatus};
use crate::validate::{validate, FieldError};

/// Which control triggered the submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Save,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    FallbackLookup,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Reset control: clear everything, nothing sent
    Reset,
    /// Another submission is still in flight
    Busy,
    Invalid(FieldError),
    Saved {
        movie: PersistedMovie,
        /// Catalog match adopted by the fallback lookup, if any
        enrichment: Option<Suggestion>,
        listing: Listing,
    },
    Failed {
        error: EntryError,
        enrichment: Option<Suggestion>,
    },
}

/// Clears the in-flight flag when the attempt ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SubmissionOrchestrator {
    search: SearchClient,
    store: Arc<dyn MovieStore>,
    variant: FormVariant,
    list_cap: usize,
    state: Mutex<SubmissionState>,
    in_flight: AtomicBool,
}

impl SubmissionOrchestrator {
    pub fn new(search: SearchClient, store: Arc<dyn MovieStore>, variant: FormVariant, list_cap: usize) -> Self {
        Self {
            search,
            store,
            variant,
            list_cap,
            state: Mutex::new(SubmissionState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn variant(&self) -> FormVariant {
        self.variant
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        debug!(operation = "submission_state", from = ?*state, to = ?next, "Submission state change");
        *state = next;
    }

    /// Run one submission attempt for a snapshot of the form.
    ///
    /// The form itself is not touched; the caller clears it on
    /// [`SubmissionOutcome::Saved`] or [`SubmissionOutcome::Reset`] and keeps
    /// it otherwise.
    pub async fn submit(&self, form: &EntryForm, action: SubmitAction) -> SubmissionOutcome {
        if action == SubmitAction::Reset {
            debug!(operation = "submission_reset", "Form reset requested");
            return SubmissionOutcome::Reset;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!(operation = "submission_busy", "Submission already in progress");
            return SubmissionOutcome::Busy;
        }
        let _guard = InFlight(&self.in_flight);

        let outcome = self.run(form).await;
        self.transition(SubmissionState::Idle);
        outcome
    }

    async fn run(&self, form: &EntryForm) -> SubmissionOutcome {
        self.transition(SubmissionState::Validating);
        let mut record = build_record(&form.to_raw_state());
        if let Err(field_error) = validate(&record, &self.variant) {
            debug!(operation = "submission_invalid", field = %field_error.field, "Validation failed");
            self.transition(SubmissionState::Invalid);
            return SubmissionOutcome::Invalid(field_error);
        }

        let enrichment = if record.has_provenance() {
            None
        } else {
            self.transition(SubmissionState::FallbackLookup);
            self.fallback_lookup(&record.title).await
        };
        if let Some(found) = &enrichment {
            record = adopt(record, found);
        }

        self.transition(SubmissionState::Submitting);
        match self.store.create(&record).await {
            Ok(movie) => {
                info!(operation = "submission_saved", id = %movie.id, title = %movie.record.title, "Movie saved");
                self.transition(SubmissionState::Succeeded);
                let listing = fetch_listing(self.store.as_ref(), self.list_cap).await;
                SubmissionOutcome::Saved {
                    movie,
                    enrichment,
                    listing,
                }
            }
            Err(e) => {
                warn!(operation = "submission_failed", error = %e, "Store rejected the movie");
                self.transition(SubmissionState::Failed);
                SubmissionOutcome::Failed {
                    error: EntryError::PersistenceFailed(e),
                    enrichment,
                }
            }
        }
    }

    /// Best-effort catalog match for a typed title
    async fn fallback_lookup(&self, title: &str) -> Option<Suggestion> {
        let outcome = self.search.search(title).await;
        if let SearchStatus::Failed(message) = &outcome.status {
            debug!(
                operation = "fallback_lookup",
                error = %EntryError::FallbackLookupFailed(message.clone()),
                "Continuing without catalog match"
            );
        }
        outcome.suggestions.into_iter().next()
    }

    /// Re-read the listing without submitting
    pub async fn refresh_listing(&self) -> Listing {
        fetch_listing(self.store.as_ref(), self.list_cap).await
    }
}

/// Take the catalog's canonical title and provenance for `record`
fn adopt(record: NormalizedRecord, found: &Suggestion) -> NormalizedRecord {
    let mut enriched = record.with_provenance(Some(&found.provenance()));
    enriched.title = found.title.clone();
    enriched
}

#[cfg(test)]
mod tests;
