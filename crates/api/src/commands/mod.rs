//! User-facing commands

pub mod account;

pub use account::{show_form, sign_in, sign_out, submit_form};
