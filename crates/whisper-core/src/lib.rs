//! # Whisper Core
//!
//! The domain layer of the Whisper confession wall.
//! Posts are anonymous, guarded by a hashed secret code, and collect
//! append-only reactions and comments. This crate holds the business rules
//! and the ports infrastructure has to implement; it does no I/O itself.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::PostService;
