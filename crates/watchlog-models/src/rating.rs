//! Half-step rating scale shared by the entry form and the listing.

pub const RATING_MIN: f64 = 0.5;
pub const RATING_MAX: f64 = 5.0;
pub const RATING_STEP: f64 = 0.5;

/// Discrete values offered by the rating selector
pub const RATING_CHOICES: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

const STEP_TOLERANCE: f64 = 1e-9;

/// Whether `rating` lies in 0.5..=5.0 on a 0.5 step
pub fn is_valid_rating(rating: f64) -> bool {
    if !rating.is_finite() || rating < RATING_MIN || rating > RATING_MAX {
        return false;
    }
    let steps = rating / RATING_STEP;
    (steps - steps.round()).abs() < STEP_TOLERANCE
}

/// Render a rating as stars, e.g. 3.5 -> "★★★½"
pub fn to_stars(rating: f64) -> String {
    if !rating.is_finite() || rating <= 0.0 {
        return String::new();
    }
    let clamped = rating.min(RATING_MAX);
    let full = clamped.floor() as usize;
    let mut stars = "★".repeat(full);
    if clamped - clamped.floor() >= 0.5 {
        stars.push('½');
    }
    stars
}
