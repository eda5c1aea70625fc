//! Suggestion list with a keyboard cursor and race-safe search responses.
//!
//! Every keystroke bumps a request token and schedules a debounced search
//! tagged with it. A response is only applied while its token is still the
//! current one, so late answers to superseded keystrokes are dropped no
//! matter in which order the network delivers them.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;
use watchlog_models::Suggestion;

use crate::debounce::Debouncer;
use crate::form::EntryForm;
use crate::search::{SearchClient, SearchOutcome, SearchStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    Next,
    Prev,
}

/// Result of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Moved(usize),
    /// Moved above the first entry; focus goes back to the title input
    FocusInput,
    Unchanged,
}

/// Snapshot published to the rendering surface after every change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionView {
    /// Request token this snapshot corresponds to
    pub generation: u64,
    pub suggestions: Vec<Suggestion>,
    pub cursor: Option<usize>,
    pub visible: bool,
    /// Transient search status, e.g. a failed lookup
    pub status: Option<String>,
}

#[derive(Debug, Default)]
struct ListState {
    token: u64,
    suggestions: Vec<Suggestion>,
    cursor: Option<usize>,
    visible: bool,
    status: Option<String>,
}

impl ListState {
    fn view(&self) -> SuggestionView {
        SuggestionView {
            generation: self.token,
            suggestions: self.suggestions.clone(),
            cursor: self.cursor,
            visible: self.visible,
            status: self.status.clone(),
        }
    }

    fn clear(&mut self) {
        self.suggestions.clear();
        self.cursor = None;
        self.visible = false;
    }
}

struct Shared {
    state: Mutex<ListState>,
    views: watch::Sender<SuggestionView>,
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, state: &ListState) {
        self.views.send_replace(state.view());
    }

    fn apply(&self, token: u64, outcome: SearchOutcome) -> bool {
        let mut state = self.lock();
        if token != state.token {
            debug!(
                operation = "suggestions_stale",
                token = token,
                current = state.token,
                "Discarding superseded search response"
            );
            return false;
        }

        state.status = match outcome.status {
            SearchStatus::Failed(message) => Some(message),
            SearchStatus::Skipped | SearchStatus::Completed => None,
        };
        state.visible = !outcome.suggestions.is_empty();
        state.suggestions = outcome.suggestions;
        state.cursor = None;
        self.publish(&state);
        true
    }
}

pub struct SuggestionController {
    shared: Arc<Shared>,
    debouncer: Debouncer<(u64, String)>,
}

impl SuggestionController {
    pub fn new(search: SearchClient, debounce: Duration) -> Self {
        let (views, _) = watch::channel(SuggestionView::default());
        let shared = Arc::new(Shared {
            state: Mutex::new(ListState::default()),
            views,
        });

        let target = Arc::clone(&shared);
        let debouncer = Debouncer::new(debounce, move |(token, text): (u64, String)| {
            let search = search.clone();
            let target = Arc::clone(&target);
            async move {
                let outcome = search.search(&text).await;
                target.apply(token, outcome);
            }
        });

        Self { shared, debouncer }
    }

    /// Receiver for view snapshots
    pub fn subscribe(&self) -> watch::Receiver<SuggestionView> {
        self.shared.views.subscribe()
    }

    pub fn view(&self) -> SuggestionView {
        self.shared.lock().view()
    }

    pub fn current_token(&self) -> u64 {
        self.shared.lock().token
    }

    /// Start a new request generation for `text` and schedule its search.
    ///
    /// Returns the token the eventual response must carry to be applied.
    pub fn on_input_changed(&self, text: &str) -> u64 {
        let token = {
            let mut state = self.shared.lock();
            state.token += 1;
            state.token
        };
        self.debouncer.trigger((token, text.to_string()));
        token
    }

    /// Apply a search response tagged with `token`.
    ///
    /// Returns `false` (and changes nothing) when a newer request has
    /// superseded it.
    pub fn apply_response(&self, token: u64, outcome: SearchOutcome) -> bool {
        self.shared.apply(token, outcome)
    }

    pub fn move_cursor(&self, direction: CursorDirection) -> CursorMove {
        let mut state = self.shared.lock();
        let len = state.suggestions.len();
        if len == 0 {
            return CursorMove::Unchanged;
        }

        let moved = match (direction, state.cursor) {
            (CursorDirection::Next, None) => CursorMove::Moved(0),
            (CursorDirection::Next, Some(i)) => CursorMove::Moved((i + 1).min(len - 1)),
            (CursorDirection::Prev, None) | (CursorDirection::Prev, Some(0)) => CursorMove::FocusInput,
            (CursorDirection::Prev, Some(i)) => CursorMove::Moved(i - 1),
        };

        state.cursor = match moved {
            CursorMove::Moved(i) => Some(i),
            _ => None,
        };
        self.shared.publish(&state);
        moved
    }

    /// Commit the suggestion at `index`, or at the cursor when `None`.
    ///
    /// Copies title, poster and id into `form`, then clears the list.
    /// No-op when the list is empty or nothing is selected.
    pub fn commit_selection(&self, index: Option<usize>, form: &mut EntryForm) -> Option<Suggestion> {
        let chosen = {
            let state = self.shared.lock();
            index
                .or(state.cursor)
                .and_then(|i| state.suggestions.get(i))
                .cloned()
        }?;

        form.apply_suggestion(&chosen);
        debug!(operation = "suggestion_commit", id = %chosen.id, title = %chosen.title, "Suggestion selected");
        self.invalidate();
        Some(chosen)
    }

    /// Close the list without committing anything
    pub fn dismiss(&self) {
        self.invalidate();
    }

    /// Clear the list and supersede any search still in flight
    fn invalidate(&self) {
        self.debouncer.cancel();
        let mut state = self.shared.lock();
        state.token += 1;
        state.clear();
        state.status = None;
        self.shared.publish(&state);
    }

    /// Wait until the view reflects the latest request generation
    pub async fn settled(&self) -> SuggestionView {
        let mut views = self.subscribe();
        loop {
            // Read the token before borrowing the view; never hold both locks
            let current = self.current_token();
            let view = views.borrow_and_update().clone();
            if view.generation >= current {
                return view;
            }
            if views.changed().await.is_err() {
                return self.view();
            }
        }
    }
}
