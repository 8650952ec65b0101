//! Field rules for the sign-up form
//!
//! These are the checks the form applies before a submission reaches the
//! account service. Every violation is collected so the form can flag all
//! offending fields at once.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    ADDRESS_MIN_LEN, MAX_BIRTH_YEAR, MIN_BIRTH_YEAR, PASSWORD_MAX_LEN, PASSWORD_MIN_LEN,
    USERNAME_MAX_LEN,
};
use crate::errors::{FieldError, ValidationRejection};
use crate::types::FormInput;

/// Static email regex pattern compiled once at first use
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Optional leading `+`, starts with a digit, at least ten digits overall.
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\d(?:.*\d){9}.*$").expect("PHONE_REGEX pattern is valid and well-formed")
});

impl FormInput {
    /// Check every field rule.
    ///
    /// `has_cached_form` relaxes the photo requirement: a returning user who
    /// already has a cached profile does not need to pick a photo again.
    ///
    /// # Errors
    /// `ValidationRejection::InvalidFields` listing each failing field.
    pub fn validate(&self, has_cached_form: bool) -> Result<(), ValidationRejection> {
        let mut errors = Vec::new();

        let username_len = self.username.chars().count();
        if username_len == 0 {
            errors.push(FieldError::new("username", "Username is required"));
        } else if username_len > USERNAME_MAX_LEN {
            errors.push(FieldError::new("username", "Username must not exceed 20 characters"));
        }

        if self.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !EMAIL_REGEX.is_match(&self.email) {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }

        if self.address.chars().count() < ADDRESS_MIN_LEN {
            errors.push(FieldError::new("address", "Address should be at least 10 characters"));
        }

        if !PHONE_REGEX.is_match(&self.phone) {
            errors.push(FieldError::new("phone", "Enter a valid phone number"));
        }

        if !self.password.is_empty() {
            let len = self.password.chars().count();
            if len < PASSWORD_MIN_LEN {
                errors.push(FieldError::new("password", "Password should be at least 8 characters"));
            } else if len > PASSWORD_MAX_LEN {
                errors.push(FieldError::new("password", "Password must not exceed 20 characters"));
            }
        }

        if !birth_year_in_range(&self.date_of_birth) {
            errors.push(FieldError::new("dateOfBirth", "Please specify some valid date"));
        }

        if self.year_of_study.trim().is_empty() {
            errors.push(FieldError::new("yearOfStudy", "Please specify the year"));
        }

        if !self.accepted_terms {
            errors.push(FieldError::new("acceptedTerms", "Please accept the terms & conditions"));
        }

        if self.photo.is_none() && !has_cached_form {
            errors.push(FieldError::new("photo", "Please provide an image for reference"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationRejection::InvalidFields(errors))
        }
    }
}

/// The year is the part before the first `-`, within [1900, 2025].
fn birth_year_in_range(date: &str) -> bool {
    date.split('-')
        .next()
        .and_then(|year| year.trim().parse::<i32>().ok())
        .is_some_and(|year| (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).contains(&year))
}
