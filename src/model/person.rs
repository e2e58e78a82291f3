//! Person types: identifiers, validated input, stored record and client view.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

use crate::model::schema::{validate_person, ValidationError};

/// Store-assigned person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(Uuid);

/// Identifier text that does not have the store's id shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed person id `{0}`")]
pub struct MalformedId(pub String);

impl PersonId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier as received from a client.
    pub fn parse(raw: &str) -> Result<Self, MalformedId> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| MalformedId(raw.to_string()))
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Raw create/update body. Either field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPayload {
    pub name: Option<String>,
    pub number: Option<String>,
}

impl PersonPayload {
    /// Apply the presence rule, then the length rules.
    pub fn into_new_person(self) -> Result<NewPerson, ValidationError> {
        match (self.name, self.number) {
            (Some(name), Some(number)) if !name.is_empty() && !number.is_empty() => {
                NewPerson::new(name, number)
            }
            _ => Err(ValidationError::MissingFields),
        }
    }
}

/// A name/number pair that passed validation.
///
/// Stores only accept this type, so nothing unvalidated can be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    name: String,
    number: String,
}

impl NewPerson {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let number = number.into();
        validate_person(&name, &number)?;
        Ok(Self { name, number })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

/// A person as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    pub number: String,
    /// Store-internal revision, bumped on every update.
    pub version: i64,
}

impl PersonRecord {
    /// Build the initial record for a freshly inserted person.
    pub fn create(id: PersonId, person: NewPerson) -> Self {
        Self {
            id,
            name: person.name,
            number: person.number,
            version: 0,
        }
    }

    /// Replace name and number in place, keeping the id.
    pub fn apply_update(&mut self, person: NewPerson) {
        self.name = person.name;
        self.number = person.number;
        self.version += 1;
    }
}

/// Client-facing shape of a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonView {
    pub id: String,
    pub name: String,
    pub number: String,
}

impl From<&PersonRecord> for PersonView {
    fn from(record: &PersonRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            number: record.number.clone(),
        }
    }
}

impl From<PersonRecord> for PersonView {
    fn from(record: PersonRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name,
            number: record.number,
        }
    }
}
