//! # AccountDesk App
//!
//! Application layer: wiring and the commands a front end calls.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Account commands (submit form, sign in, sign out, show cached form)
//! - Command-line parsing and the `accountdesk` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod notifier;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
pub use notifier::TracingNotifier;
