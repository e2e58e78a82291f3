//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Per request:
//!     → request id (x-request-id) set before anything else
//!     → TraceLayer span carries the id, logs status and latency
//!     → request_logger middleware logs method, path, body
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Request ID flows through every log line of a request
//! - RUST_LOG wins over the configured level

pub mod logging;

pub use logging::init_tracing;
