use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

use crate::core::error::AppError;

lazy_static! {
    /// Regex for validating contact fields (phone number or email)
    /// - Valid: "+62811234567", "0811-234-567", "jane@example.com"
    /// - Invalid: "call me", "123", ""
    pub static ref CONTACT_REGEX: Regex = Regex::new(
        r"^(\+?[0-9][0-9\-\s]{6,19}|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})$"
    )
    .unwrap();
}

/// Latitude/longitude sanity check for optional report coordinates
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Flattens field-level validation failures into one user-facing message.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    AppError::Validation(messages.join("; "))
}
