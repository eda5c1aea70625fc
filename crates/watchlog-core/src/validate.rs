use thiserror::Error;
use watchlog_models::rating::is_valid_rating;
use watchlog_models::{FormField, FormVariant, NormalizedRecord};

/// Field-level validation failure, shown next to the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    fn new(field: FormField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Check a normalized record against the active form variant.
///
/// Stops at the first failing check.
pub fn validate(record: &NormalizedRecord, variant: &FormVariant) -> Result<(), FieldError> {
    if record.title.trim().is_empty() {
        return Err(FieldError::new(FormField::Title, "Please enter a movie title."));
    }

    match record.rating {
        None if variant.requires_rating => {
            return Err(FieldError::new(FormField::Rating, "Please choose a rating."));
        }
        Some(rating) if !is_valid_rating(rating) => {
            return Err(FieldError::new(
                FormField::Rating,
                "Ratings go from 0.5 to 5 in half-star steps.",
            ));
        }
        _ => {}
    }

    if variant.requires_watched_date && record.watched_date.is_none() {
        return Err(FieldError::new(
            FormField::WatchedDate,
            "Please enter the date you watched it.",
        ));
    }

    Ok(())
}
