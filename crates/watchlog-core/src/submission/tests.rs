use super::*;
use crate::test_support::{hit, FakeCatalog, FakeStore};
use async_trait::async_trait;
use tokio::sync::Notify;
use watchlog_models::FormField;
use watchlog_sources::StoreError;

fn orchestrator(catalog: Arc<FakeCatalog>, store: Arc<dyn MovieStore>) -> SubmissionOrchestrator {
    SubmissionOrchestrator::new(SearchClient::new(catalog), store, FormVariant::default(), 100)
}

fn filled_form(title: &str) -> EntryForm {
    let mut form = EntryForm::new();
    form.set_title(title);
    form.rating = "4.5".to_string();
    form.watched_date = "2024-03-05".to_string();
    form
}

#[tokio::test]
async fn test_empty_title_makes_no_network_call() {
    let catalog = Arc::new(FakeCatalog::new());
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let outcome = orchestrator.submit(&filled_form("   "), SubmitAction::Save).await;
    match outcome {
        SubmissionOutcome::Invalid(err) => assert_eq!(err.field, FormField::Title),
        other => panic!("expected invalid, got {:?}", other),
    }
    assert_eq!(catalog.call_count(), 0);
    assert_eq!(store.create_calls(), 0);
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_missing_rating_stops_before_date_check() {
    let orchestrator = orchestrator(Arc::new(FakeCatalog::new()), Arc::new(FakeStore::new()));
    let mut form = filled_form("Heat");
    form.rating.clear();
    form.watched_date.clear();

    match orchestrator.submit(&form, SubmitAction::Save).await {
        SubmissionOutcome::Invalid(err) => assert_eq!(err.field, FormField::Rating),
        other => panic!("expected invalid, got {:?}", other),
    }
}

#[tokio::test]
async fn test_typed_title_without_match_saves_without_provenance() {
    let catalog = Arc::new(FakeCatalog::new());
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let outcome = orchestrator.submit(&filled_form("  Obscure Film "), SubmitAction::Save).await;
    match outcome {
        SubmissionOutcome::Saved { movie, enrichment, listing } => {
            assert!(enrichment.is_none());
            assert_eq!(movie.record.title, "Obscure Film");
            assert!(movie.record.poster_url.is_none());
            assert!(movie.record.external_id.is_none());
            assert_eq!(movie.record.rating, Some(4.5));
            assert_eq!(movie.record.watched_date.as_deref(), Some("2024-03-05T00:00:00.000Z"));
            assert_eq!(listing.movies().len(), 1);
        }
        other => panic!("expected saved, got {:?}", other),
    }
    assert_eq!(catalog.calls(), vec!["Obscure Film".to_string()]);
    assert_eq!(store.create_calls(), 1);
}

#[tokio::test]
async fn test_fallback_match_enriches_record() {
    let catalog = Arc::new(FakeCatalog::new().with_hits(
        "the matrix",
        vec![hit("603", "The Matrix", Some("1999-03-30"), Some("https://img.example/603.jpg"))],
    ));
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog, store.clone());

    let outcome = orchestrator.submit(&filled_form("the matrix"), SubmitAction::Save).await;
    let SubmissionOutcome::Saved { enrichment, .. } = outcome else {
        panic!("expected saved");
    };
    assert_eq!(enrichment.map(|s| s.id), Some("603".to_string()));

    let created = store.created();
    assert_eq!(created[0].title, "The Matrix");
    assert_eq!(created[0].external_id.as_deref(), Some("603"));
    assert_eq!(created[0].poster_url.as_deref(), Some("https://img.example/603.jpg"));
}

#[tokio::test]
async fn test_fallback_ignores_blank_catalog_hit() {
    let catalog = Arc::new(FakeCatalog::new().with_hits("Heat", vec![hit("", "", None, None)]));
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let outcome = orchestrator.submit(&filled_form("Heat"), SubmitAction::Save).await;
    assert!(matches!(outcome, SubmissionOutcome::Saved { enrichment: None, .. }));
    assert_eq!(catalog.call_count(), 1);

    let created = store.created();
    assert_eq!(created[0].title, "Heat");
    assert!(created[0].external_id.is_none());
    assert!(created[0].poster_url.is_none());
}

#[tokio::test]
async fn test_fallback_takes_first_usable_hit() {
    let catalog = Arc::new(FakeCatalog::new().with_hits(
        "Heat",
        vec![hit("949", "  ", None, None), hit("949", "Heat", Some("1995-12-15"), None)],
    ));
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog, store.clone());

    orchestrator.submit(&filled_form("Heat"), SubmitAction::Save).await;
    let created = store.created();
    assert_eq!(created[0].title, "Heat");
    assert_eq!(created[0].external_id.as_deref(), Some("949"));
}

#[tokio::test]
async fn test_selected_suggestion_skips_fallback() {
    let catalog = Arc::new(FakeCatalog::new());
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let mut form = filled_form("");
    form.apply_suggestion(&Suggestion {
        id: "603".to_string(),
        title: "The Matrix".to_string(),
        poster_url: None,
        release_year: Some(1999),
    });

    assert!(matches!(
        orchestrator.submit(&form, SubmitAction::Save).await,
        SubmissionOutcome::Saved { .. }
    ));
    assert_eq!(catalog.call_count(), 0);
    assert_eq!(store.created()[0].external_id.as_deref(), Some("603"));
}

#[tokio::test]
async fn test_fallback_failure_is_not_fatal() {
    let catalog = Arc::new(FakeCatalog::new().failing());
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let outcome = orchestrator.submit(&filled_form("Heat"), SubmitAction::Save).await;
    assert!(matches!(outcome, SubmissionOutcome::Saved { enrichment: None, .. }));
    assert_eq!(catalog.call_count(), 1);
    assert_eq!(store.create_calls(), 1);
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let store = Arc::new(FakeStore::new().failing_create());
    let orchestrator = orchestrator(Arc::new(FakeCatalog::new()), store);

    match orchestrator.submit(&filled_form("Heat"), SubmitAction::Save).await {
        SubmissionOutcome::Failed { error, .. } => {
            assert!(matches!(error, EntryError::PersistenceFailed(StoreError::Storage { .. })));
            assert_eq!(error.to_string(), "Could not save your movie. Please try again.");
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(orchestrator.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn test_reset_bypasses_everything() {
    let catalog = Arc::new(FakeCatalog::new());
    let store = Arc::new(FakeStore::new());
    let orchestrator = orchestrator(catalog.clone(), store.clone());

    let outcome = orchestrator.submit(&EntryForm::new(), SubmitAction::Reset).await;
    assert!(matches!(outcome, SubmissionOutcome::Reset));
    assert_eq!(catalog.call_count(), 0);
    assert_eq!(store.create_calls(), 0);
}

/// Store whose `create` waits until released
struct GatedStore {
    inner: FakeStore,
    gate: Notify,
}

#[async_trait]
impl MovieStore for GatedStore {
    async fn create(&self, record: &NormalizedRecord) -> Result<PersistedMovie, StoreError> {
        self.gate.notified().await;
        self.inner.create(record).await
    }

    async fn list(&self) -> Result<Vec<PersistedMovie>, StoreError> {
        self.inner.list().await
    }

    async fn search(&self, terms: &str) -> Result<Vec<PersistedMovie>, StoreError> {
        self.inner.search(terms).await
    }
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_busy() {
    let store = Arc::new(GatedStore {
        inner: FakeStore::new(),
        gate: Notify::new(),
    });
    let orchestrator = Arc::new(SubmissionOrchestrator::new(
        SearchClient::new(Arc::new(FakeCatalog::new())),
        store.clone(),
        FormVariant::default(),
        100,
    ));

    let first = {
        let orchestrator = Arc::clone(&orchestrator);
        let form = filled_form("Heat");
        tokio::spawn(async move { orchestrator.submit(&form, SubmitAction::Save).await })
    };

    while orchestrator.state() != SubmissionState::Submitting {
        tokio::task::yield_now().await;
    }

    let second = orchestrator.submit(&filled_form("Alien"), SubmitAction::Save).await;
    assert!(matches!(second, SubmissionOutcome::Busy));

    store.gate.notify_one();
    let first = first.await.unwrap();
    assert!(matches!(first, SubmissionOutcome::Saved { .. }));
    assert_eq!(store.inner.create_calls(), 1);

    // Lock released once the first attempt finished
    store.gate.notify_one();
    let third = orchestrator.submit(&filled_form("Alien"), SubmitAction::Save).await;
    assert!(matches!(third, SubmissionOutcome::Saved { .. }));
}
