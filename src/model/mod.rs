//! Person model subsystem.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → PersonPayload (raw, optional fields)
//!     → schema.rs (presence + length rules)
//!     → NewPerson (validated, only way into a store)
//!     → store assigns id/version → PersonRecord
//!     → PersonView {id, name, number} → client
//! ```
//!
//! # Design Decisions
//! - Validation rules are a declarative table, not handler conditionals
//! - Uniqueness is left to the store; the model only names the error
//! - Internal fields (version) never reach the client view

pub mod person;
pub mod schema;

pub use person::{MalformedId, NewPerson, PersonId, PersonPayload, PersonRecord, PersonView};
pub use schema::{FieldRule, FieldViolation, ValidationError, PERSON_RULES};
