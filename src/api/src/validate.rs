//! Path parameter validation.

use regex::Regex;
use std::sync::LazyLock;

/// Closed set of schedule statuses accepted by `/games/status/:status`
pub const GAME_STATUSES: &[&str] = &["STATUS_FINAL", "STATUS_SCHEDULED"];

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"));

/// Rule applied to every path parameter of a route before querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    None,
    NonEmpty,
    OneOf(&'static [&'static str]),
    /// `YYYY-MM-DD`, zero-padded
    IsoDate,
}

impl Validation {
    /// Check one parameter, returning the client-facing message on failure
    pub fn check(&self, param: &str, value: &str) -> Result<(), String> {
        match self {
            Validation::None => Ok(()),
            Validation::NonEmpty => {
                if value.trim().is_empty() {
                    Err(format!("{} is required", param))
                } else {
                    Ok(())
                }
            }
            Validation::OneOf(allowed) => {
                if allowed.iter().any(|s| *s == value) {
                    Ok(())
                } else {
                    Err(format!(
                        "Invalid {}. Must be one of: {}",
                        param,
                        allowed.join(", ")
                    ))
                }
            }
            Validation::IsoDate => {
                if ISO_DATE.is_match(value) {
                    Ok(())
                } else {
                    Err("Invalid date format. Use YYYY-MM-DD".to_string())
                }
            }
        }
    }
}
