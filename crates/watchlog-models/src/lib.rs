pub mod form;
pub mod rating;
pub mod record;
pub mod suggestion;

pub use form::{FieldKind, FormField, FormSchema, FormVariant, RawFormState, RawValue};
pub use rating::{is_valid_rating, to_stars, RATING_CHOICES, RATING_MAX, RATING_MIN, RATING_STEP};
pub use record::{NormalizedRecord, PersistedMovie, Provenance};
pub use suggestion::Suggestion;
