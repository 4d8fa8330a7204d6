//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own caller-side validation (required title, registration fields) so the
//!   stores stay validation-free.

pub mod process_service;
pub mod user_service;
