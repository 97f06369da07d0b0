use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Title used for every validation failure returned by the bank service.
pub const VALIDATION_TITLE: &str = "One or more validation errors occurred.";

/// RFC 7807 problem document carrying per-field validation errors.
///
/// Returned with status 400 when a request is well-formed but breaks a
/// business rule, e.g. a withdrawal that would overdraw the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ValidationProblem {
    /// Short, human-readable summary.
    pub title: String,
    /// HTTP status code the problem was returned with.
    pub status: u16,
    /// Error messages keyed by the name of the offending field.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationProblem {
    /// Creates an empty problem with status 400.
    #[must_use]
    pub fn new() -> Self {
        Self { title: VALIDATION_TITLE.to_owned(), status: 400, errors: BTreeMap::new() }
    }

    /// Records an error message against `field`.
    #[must_use]
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.entry(field.into()).or_default().push(message.into());
        self
    }
}

impl Default for ValidationProblem {
    fn default() -> Self {
        Self::new()
    }
}
