//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler store call:
//!     → timeouts.rs (TimedStore bounds the call)
//!     → inner store
//!     → On expiry: StoreError::Timeout (rendered as a 500)
//! ```
//!
//! # Design Decisions
//! - Every store call has a deadline; the store client never waits forever
//! - Timeout errors are distinct from other store errors

pub mod timeouts;

pub use timeouts::TimedStore;
