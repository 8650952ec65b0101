//! Command-line argument handling

use std::path::{Path, PathBuf};

use accountdesk_domain::{AccountDeskError, FormInput, PhotoFile, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "accountdesk")]
#[command(about = "Sign up, update and sign in accounts against the hosted backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Create or update the account from a form file
    Submit {
        /// JSON form submission
        form: PathBuf,
        /// Profile photo, required for a new account
        photo: Option<PathBuf>,
    },

    /// Sign in and refresh the cached form
    SignIn { email: String, password: String },

    /// Drop the session and the cached form
    SignOut,

    /// Print the cached form as JSON
    ShowForm,
}

/// Read a form submission from a JSON file and attach the photo, if given.
///
/// # Errors
/// `InvalidInput` for unreadable files or malformed JSON.
pub fn load_form(form: &Path, photo: Option<&Path>) -> Result<FormInput> {
    let raw = std::fs::read_to_string(form).map_err(|e| {
        AccountDeskError::InvalidInput(format!("cannot read {}: {e}", form.display()))
    })?;
    let input: FormInput = serde_json::from_str(&raw).map_err(|e| {
        AccountDeskError::InvalidInput(format!("{} is not a valid form: {e}", form.display()))
    })?;

    match photo {
        Some(path) => Ok(input.with_photo(load_photo(path)?)),
        None => Ok(input),
    }
}

fn load_photo(path: &Path) -> Result<PhotoFile> {
    let bytes = std::fs::read(path).map_err(|e| {
        AccountDeskError::InvalidInput(format!("cannot read {}: {e}", path.display()))
    })?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AccountDeskError::InvalidInput(format!("{} has no file name", path.display())))?;
    Ok(PhotoFile::new(name, content_type_for(path), bytes))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
