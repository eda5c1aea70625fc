use watchlog_models::{FormField, Provenance, RawFormState, Suggestion};

/// Typed view of the entry form as the user is filling it in.
///
/// Provenance is private so it can only be attached from a catalog
/// suggestion and is dropped as soon as the title is edited by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    title: String,
    pub rating: String,
    pub watched_date: String,
    pub rewatch: bool,
    provenance: Option<Provenance>,
}

impl EntryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// Free-text edit of the title. Clears any catalog link.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.provenance = None;
    }

    /// Copy a suggestion's title, poster and id into the form
    pub fn apply_suggestion(&mut self, suggestion: &Suggestion) {
        self.title = suggestion.title.clone();
        self.provenance = Some(suggestion.provenance());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Encode the form the way a browser would submit it: every text field
    /// present, the checkbox only when checked.
    pub fn to_raw_state(&self) -> RawFormState {
        let mut raw = RawFormState::new()
            .with(FormField::Title.name(), self.title.as_str())
            .with(FormField::Rating.name(), self.rating.as_str())
            .with(FormField::WatchedDate.name(), self.watched_date.as_str());

        let (external_id, poster_url) = match &self.provenance {
            Some(p) => (p.external_id.clone(), p.poster_url.clone().unwrap_or_default()),
            None => (String::new(), String::new()),
        };
        raw.set(FormField::ExternalId.name(), external_id);
        raw.set(FormField::PosterUrl.name(), poster_url);

        if self.rewatch {
            raw.set(FormField::Rewatch.name(), "on");
        }
        raw
    }
}
