//! # Lending Common
//!
//! Shared vocabulary of the lending workspace. Everything in here is pure Rust
//! with no IO, so it can be used by the core, the adapters and the CLI alike.
//!
//! * **[`models`]**: Books, users, reservations and their identifiers.
//! * **[`repository`]**: Outbound ports (traits) the core depends on.
//! * **[`error`]**: The error taxonomy surfaced to callers.
//! * **[`config`]**: Tunables for fee and duration rules.

pub mod config;
pub mod error;
pub mod models;
pub mod repository;

pub use error::{RepositoryError, ReservationError};
