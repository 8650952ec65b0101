//! Utility modules for command plumbing

pub mod logging;
