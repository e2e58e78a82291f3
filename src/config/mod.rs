//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PORT, DATABASE_URL, PHONEBOOK_LOG)
//!     → validation.rs (semantic checks)
//!     → PhonebookConfig (validated, immutable)
//!     → shared via Arc with handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields but the port have defaults; a missing port is fatal
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_from_env, ConfigError};
pub use schema::PhonebookConfig;
pub use schema::ListenerConfig;
pub use schema::StoreConfig;
