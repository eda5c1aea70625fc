use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single raw value as produced by the entry surface
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RawValue {
    Checked(bool),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.as_str()),
            RawValue::Checked(_) => None,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Checked(value)
    }
}

/// Field name to raw value. Unchecked checkboxes may simply be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFormState {
    values: BTreeMap<String, RawValue>,
}

impl RawFormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(RawValue::as_text)
    }
}

/// Input type of a form field, which selects its normalization rule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Hidden,
    Checkbox,
    Number,
    Range,
    Date,
    Rating,
}

/// Ordered list of declared fields and their kinds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    fields: Vec<(String, FieldKind)>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push((name.into(), kind));
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, FieldKind)> {
        self.fields.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Schema of the movie entry form
    pub fn movie() -> Self {
        Self::new()
            .field(FormField::Title.name(), FieldKind::Text)
            .field(FormField::Rating.name(), FieldKind::Rating)
            .field(FormField::WatchedDate.name(), FieldKind::Date)
            .field(FormField::PosterUrl.name(), FieldKind::Hidden)
            .field(FormField::ExternalId.name(), FieldKind::Hidden)
            .field(FormField::Rewatch.name(), FieldKind::Checkbox)
    }
}

/// Fields of the movie entry form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Rating,
    WatchedDate,
    PosterUrl,
    ExternalId,
    Rewatch,
}

impl FormField {
    /// Wire / form-encoding name of the field
    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Rating => "rating",
            FormField::WatchedDate => "watchedDate",
            FormField::PosterUrl => "posterUrl",
            FormField::ExternalId => "externalId",
            FormField::Rewatch => "rewatch",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which optional fields the active form requires
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormVariant {
    #[serde(default = "default_true")]
    pub requires_rating: bool,
    #[serde(default = "default_true")]
    pub requires_watched_date: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FormVariant {
    fn default() -> Self {
        Self {
            requires_rating: true,
            requires_watched_date: true,
        }
    }
}

impl FormVariant {
    /// Variant that only asks for a title
    pub fn title_only() -> Self {
        Self {
            requires_rating: false,
            requires_watched_date: false,
        }
    }
}
