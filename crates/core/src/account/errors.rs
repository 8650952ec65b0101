//! Terminal failures of the account flows

use accountdesk_domain::constants::messages;
use accountdesk_domain::{AuthError, DataError, StoreError, ValidationRejection};
use thiserror::Error;

/// Why an upsert or sign-in stopped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("password update failed: {0}")]
    PasswordUpdate(#[source] AuthError),

    #[error("sign-in failed: {0}")]
    SignIn(#[source] AuthError),

    #[error("sign-out failed: {0}")]
    SignOut(#[source] AuthError),

    #[error("photo upload failed: {0}")]
    Upload(#[source] StoreError),

    #[error("profile insert failed: {0}")]
    Insert(#[source] DataError),

    #[error("profile update failed: {0}")]
    Update(#[source] DataError),

    #[error("profile lookup failed: {0}")]
    Lookup(#[source] DataError),

    #[error(transparent)]
    Rejected(#[from] ValidationRejection),
}

impl AccountError {
    /// The single message shown to the user, or `None` when the failure stays
    /// silent (rate limiting is only logged).
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::PasswordUpdate(err) | Self::SignIn(err) if err.is_rate_limited() => None,
            Self::PasswordUpdate(_) => Some(messages::PASSWORD_UPDATE_FAILED),
            Self::Update(_) => Some(messages::PROFILE_UPDATE_FAILED),
            Self::SignIn(_) | Self::SignOut(_) | Self::Upload(_) | Self::Insert(_) | Self::Lookup(_) => {
                Some(messages::GENERIC_SERVER_ERROR)
            }
            Self::Rejected(ValidationRejection::EmailChangeNotAllowed) => {
                Some(messages::EMAIL_CHANGE_REJECTED)
            }
            Self::Rejected(ValidationRejection::PhotoRequired) => Some(messages::PHOTO_REQUIRED),
            Self::Rejected(ValidationRejection::InvalidFields(_)) => Some(messages::INVALID_FORM),
        }
    }
}
