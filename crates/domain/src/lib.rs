//! # AccountDesk Domain
//!
//! Business domain types and models for AccountDesk.
//!
//! This crate contains:
//! - Profile record, form input and cached-form projections
//! - Session and notification types
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//! - Form field validation rules
//!
//! ## Architecture
//! - No dependencies on other AccountDesk crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
