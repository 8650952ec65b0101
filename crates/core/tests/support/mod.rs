//! Shared test helpers for `accountdesk-core` integration tests.
//!
//! Recording in-memory fakes for every account port plus a harness that wires
//! them into an `AccountService`, so scenario tests can focus on call
//! sequencing instead of boilerplate.

pub mod gateways;

pub use gateways::*;
