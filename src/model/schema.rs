//! Validation rules for person records.

use std::fmt;
use thiserror::Error;

/// Minimum-length constraint on a single string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    /// Field name as seen by clients.
    pub field: &'static str,
    /// Minimum length in characters.
    pub min_length: usize,
}

/// Rules every stored person must satisfy.
pub const PERSON_RULES: [FieldRule; 2] = [
    FieldRule { field: "name", min_length: 3 },
    FieldRule { field: "number", min_length: 8 },
];

impl FieldRule {
    /// Check a value against this rule.
    pub fn check(&self, value: &str) -> Result<(), FieldViolation> {
        if value.chars().count() < self.min_length {
            return Err(FieldViolation {
                field: self.field,
                value: value.to_string(),
                min_length: self.min_length,
            });
        }
        Ok(())
    }
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub value: String,
    pub min_length: usize,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` is shorter than the minimum allowed length ({})",
            self.field, self.value, self.min_length
        )
    }
}

/// Errors rejecting a write before or during persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name or number absent or empty.
    #[error("name and number are required")]
    MissingFields,

    /// One or more length rules failed.
    #[error("Person validation failed: {}", join_violations(.0))]
    Constraints(Vec<FieldViolation>),

    /// The store rejected a duplicate value for a unique field.
    #[error("{0} must be unique")]
    NotUnique(&'static str),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply every rule in `PERSON_RULES` and collect all failures.
pub fn validate_person(name: &str, number: &str) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = PERSON_RULES
        .iter()
        .zip([name, number])
        .filter_map(|(rule, value)| rule.check(value).err())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Constraints(violations))
    }
}
