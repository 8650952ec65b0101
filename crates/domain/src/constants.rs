//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Device-local storage keys
pub const FORM_CACHE_KEY: &str = "adimis-schema-form-FORMDATA";
pub const AUTH_SESSION_KEY: &str = "accountdesk-auth-token";

// Hosted backend defaults
pub const DEFAULT_PROFILE_TABLE: &str = "Users";
pub const DEFAULT_PHOTO_BUCKET: &str = "Files";
pub const DEFAULT_IMAGE_PATH_PREFIX: &str = "/storage/v1/object/public/Files/";
pub const PHOTO_CACHE_CONTROL_SECS: u32 = 3600;

// HTTP defaults
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 1;
pub const DEFAULT_CACHE_PATH: &str = "accountdesk-cache.json";

// Form field bounds
pub const USERNAME_MAX_LEN: usize = 20;
pub const ADDRESS_MIN_LEN: usize = 10;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;
pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_BIRTH_YEAR: i32 = 2025;

/// User-visible notification texts.
pub mod messages {
    pub const GENERIC_SERVER_ERROR: &str = "Server Error !!! Try again later";
    pub const EMAIL_CHANGE_REJECTED: &str = "Cannot change email !!!";
    pub const PASSWORD_UPDATE_FAILED: &str = "Sorry, cannot update password";
    pub const PROFILE_UPDATE_FAILED: &str = "Sorry, data update not successful !!! Try again later";
    pub const PHOTO_REQUIRED: &str = "Please provide an image for reference";
    pub const INVALID_FORM: &str = "Please provide all the values !!!";
    pub const REGISTRATION_SUCCEEDED: &str =
        "Registration successful !!! Please confirm your email";
    pub const PROFILE_UPDATED: &str = "User data update successful !!!";
    pub const PASSWORD_UPDATED: &str = "Password update successful !!!";
    pub const SIGN_IN_SUCCEEDED: &str = "Sign In !!! successful";
    pub const SIGNED_OUT: &str = "Signed out";
}
