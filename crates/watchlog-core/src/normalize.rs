//! Raw form values to canonical typed values.
//!
//! Every function here is total: input that cannot be understood becomes
//! the neutral value for its kind (`false`, `None`, or an empty string)
//! instead of an error. Range and step checks belong to validation.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};
use watchlog_models::{FieldKind, FormField, FormSchema, NormalizedRecord, Provenance, RawFormState, RawValue, RATING_MAX};

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Checked boxes are `true`; absent or unchecked boxes are `false`
pub fn normalize_checkbox(value: Option<&RawValue>) -> bool {
    match value {
        Some(RawValue::Checked(checked)) => *checked,
        // Form encoding sends "on" for a checked box with no explicit value
        Some(RawValue::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "on" | "true" | "1" | "yes" | "checked"
        ),
        None => false,
    }
}

/// Blank or unparseable text is `None`, never NaN
pub fn normalize_number(text: Option<&str>) -> Option<f64> {
    non_blank(text)
        .and_then(|t| t.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// Calendar date to an ISO-8601 timestamp at UTC midnight.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, so normalizing an
/// already-normalized value returns it unchanged.
pub fn normalize_date(text: Option<&str>) -> Option<String> {
    let text = non_blank(text)?;
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(
        Utc.from_utc_datetime(&midnight)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Rating from a selector value, a fraction, or a star string.
///
/// `"4.5"` is 4.5, `"9/10"` is 4.5 (scaled onto five), `"★★★½"` is 3.5.
/// Values are not clamped.
pub fn normalize_rating(text: Option<&str>) -> Option<f64> {
    let text = non_blank(text)?;

    if text.contains('★') || text.contains('½') {
        let full = text.chars().filter(|c| *c == '★').count() as f64;
        let half = if text.contains('½') { 0.5 } else { 0.0 };
        return Some(full + half).filter(|r| *r > 0.0);
    }

    if let Some((numerator, denominator)) = text.split_once('/') {
        let numerator = normalize_number(Some(numerator))?;
        let denominator = normalize_number(Some(denominator))?;
        if denominator <= 0.0 {
            return None;
        }
        return Some(numerator * RATING_MAX / denominator);
    }

    normalize_number(Some(text))
}

fn normalize_hidden(text: Option<&str>) -> Option<String> {
    non_blank(text).map(str::to_string)
}

fn optional(value: Option<impl Into<Value>>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

/// Apply the per-kind rule to every field declared in `schema`.
///
/// Fields present in `raw` but not in the schema are dropped.
pub fn normalize_form(raw: &RawFormState, schema: &FormSchema) -> Map<String, Value> {
    let mut out = Map::new();
    for (name, kind) in schema.fields() {
        let value = match kind {
            FieldKind::Checkbox => Value::Bool(normalize_checkbox(raw.get(name))),
            FieldKind::Number | FieldKind::Range => optional(normalize_number(raw.text(name))),
            FieldKind::Date => optional(normalize_date(raw.text(name))),
            FieldKind::Rating => optional(normalize_rating(raw.text(name))),
            FieldKind::Hidden => optional(normalize_hidden(raw.text(name))),
            FieldKind::Text => Value::String(raw.text(name).unwrap_or_default().trim().to_string()),
        };
        out.insert(name.to_string(), value);
    }
    out
}

/// Build the storage record from a raw movie form
pub fn build_record(raw: &RawFormState) -> NormalizedRecord {
    let fields = normalize_form(raw, &FormSchema::movie());
    let text = |field: FormField| fields.get(field.name()).and_then(Value::as_str).map(str::to_string);

    let provenance = text(FormField::ExternalId).map(|external_id| Provenance {
        external_id,
        poster_url: text(FormField::PosterUrl),
    });

    let mut record = NormalizedRecord::new(text(FormField::Title).unwrap_or_default())
        .with_provenance(provenance.as_ref());
    record.rating = fields.get(FormField::Rating.name()).and_then(Value::as_f64);
    record.watched_date = text(FormField::WatchedDate);
    record.rewatch = fields
        .get(FormField::Rewatch.name())
        .and_then(Value::as_bool)
        .unwrap_or(false);
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_absent_and_false_are_identical() {
        assert!(!normalize_checkbox(None));
        assert!(!normalize_checkbox(Some(&RawValue::Checked(false))));
        assert!(!normalize_checkbox(Some(&RawValue::from("off"))));
        assert!(normalize_checkbox(Some(&RawValue::Checked(true))));
        assert!(normalize_checkbox(Some(&RawValue::from("on"))));
    }

    #[test]
    fn test_number_blank_and_garbage_are_none() {
        assert_eq!(normalize_number(None), None);
        assert_eq!(normalize_number(Some("   ")), None);
        assert_eq!(normalize_number(Some("abc")), None);
        assert_eq!(normalize_number(Some("NaN")), None);
        assert_eq!(normalize_number(Some(" 42 ")), Some(42.0));
        assert_eq!(normalize_number(Some("3.5")), Some(3.5));
    }

    #[test]
    fn test_date_round_trip_keeps_calendar_date() {
        let normalized = normalize_date(Some("2024-03-05")).unwrap();
        assert_eq!(normalized, "2024-03-05T00:00:00.000Z");

        let reparsed = DateTime::parse_from_rfc3339(&normalized).unwrap();
        assert_eq!(reparsed.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

        assert_eq!(normalize_date(Some(&normalized)), Some(normalized.clone()));
    }

    #[test]
    fn test_date_blank_and_garbage_are_none() {
        assert_eq!(normalize_date(Some("")), None);
        assert_eq!(normalize_date(Some("next tuesday")), None);
        assert_eq!(normalize_date(Some("2024-02-30")), None);
    }

    #[test]
    fn test_rating_encodings() {
        assert_eq!(normalize_rating(Some("4.5")), Some(4.5));
        assert_eq!(normalize_rating(Some("9/10")), Some(4.5));
        assert_eq!(normalize_rating(Some("3/5")), Some(3.0));
        assert_eq!(normalize_rating(Some("★★★½")), Some(3.5));
        assert_eq!(normalize_rating(Some("½")), Some(0.5));
        assert_eq!(normalize_rating(Some("1/0")), None);
        assert_eq!(normalize_rating(Some("")), None);
    }

    #[test]
    fn test_rating_out_of_range_is_not_clamped() {
        assert_eq!(normalize_rating(Some("7")), Some(7.0));
        assert_eq!(normalize_rating(Some("0.3")), Some(0.3));
    }

    #[test]
    fn test_normalize_form_by_kind() {
        let schema = FormSchema::new()
            .field("name", FieldKind::Text)
            .field("age", FieldKind::Number)
            .field("volume", FieldKind::Range)
            .field("adopted", FieldKind::Date)
            .field("microchip", FieldKind::Checkbox);
        let raw = RawFormState::new()
            .with("name", "  Tom ")
            .with("age", "")
            .with("volume", "7")
            .with("adopted", "2023-11-01")
            .with("ignored", "x");

        let out = normalize_form(&raw, &schema);
        assert_eq!(out["name"], Value::from("Tom"));
        assert_eq!(out["age"], Value::Null);
        assert_eq!(out["volume"], Value::from(7.0));
        assert_eq!(out["adopted"], Value::from("2023-11-01T00:00:00.000Z"));
        assert_eq!(out["microchip"], Value::Bool(false));
        assert!(!out.contains_key("ignored"));
    }

    #[test]
    fn test_build_record_without_provenance() {
        let raw = RawFormState::new()
            .with("title", " Heat ")
            .with("rating", "4")
            .with("watchedDate", "2024-03-05")
            .with("externalId", "")
            .with("posterUrl", "")
            .with("rewatch", "on");

        let record = build_record(&raw);
        assert_eq!(record.title, "Heat");
        assert_eq!(record.rating, Some(4.0));
        assert_eq!(record.watched_date.as_deref(), Some("2024-03-05T00:00:00.000Z"));
        assert!(record.external_id.is_none());
        assert!(record.poster_url.is_none());
        assert!(record.rewatch);
    }

    #[test]
    fn test_build_record_ignores_orphan_poster() {
        let raw = RawFormState::new()
            .with("title", "Heat")
            .with("posterUrl", "https://img.example/x.jpg");

        let record = build_record(&raw);
        assert!(record.poster_url.is_none());
        assert!(record.external_id.is_none());
    }
}
