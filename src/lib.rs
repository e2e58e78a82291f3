//! Phonebook Service Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod resilience;
pub mod store;

pub use config::PhonebookConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
