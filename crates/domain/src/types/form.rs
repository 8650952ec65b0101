//! Form-side representations of a profile
//!
//! `FormInput` is what the sign-up form submits (transport form: tags as a
//! comma-joined string, year as a string, plus the transient password and
//! photo). `CachedForm` is the display-ready projection kept on the device to
//! pre-fill the form; its password is always blank.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::{join_tags, parse_profile_date, profile_date, split_tags, Gender, ProfileRow};
use crate::errors::{FieldError, ValidationRejection};

/// A photo selected in the form
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoFile {
    /// Suggested object name, usually the original file name
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), content_type: content_type.into(), bytes }
    }
}

impl fmt::Debug for PhotoFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Raw form submission
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    /// Transient. Forwarded to the auth service only, never stored.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(alias = "date")]
    pub date_of_birth: String,
    #[serde(alias = "year")]
    pub year_of_study: String,
    #[serde(alias = "expertise", default)]
    pub expertise_tags: String,
    #[serde(alias = "terms", default)]
    pub accepted_terms: bool,
    #[serde(skip)]
    pub photo: Option<PhotoFile>,
}

impl fmt::Debug for FormInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("phone", &self.phone)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .field("gender", &self.gender)
            .field("date_of_birth", &self.date_of_birth)
            .field("year_of_study", &self.year_of_study)
            .field("expertise_tags", &self.expertise_tags)
            .field("accepted_terms", &self.accepted_terms)
            .field("photo", &self.photo)
            .finish()
    }
}

impl FormInput {
    /// Attach the selected photo.
    pub fn with_photo(mut self, photo: PhotoFile) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Build the storage form: tags split into a sequence, year coerced to a
    /// number, date parsed. The password is dropped.
    ///
    /// # Errors
    /// `ValidationRejection::InvalidFields` when the date or year do not
    /// parse.
    pub fn to_profile_row(
        &self,
        photo_url: Option<String>,
    ) -> Result<ProfileRow, ValidationRejection> {
        let mut errors = Vec::new();

        let date_of_birth = parse_profile_date(&self.date_of_birth);
        if date_of_birth.is_none() {
            errors.push(FieldError::new("dateOfBirth", "Please specify some valid date"));
        }

        let year_of_study = self.year_of_study.trim().parse::<i32>().ok();
        if year_of_study.is_none() {
            errors.push(FieldError::new("yearOfStudy", "Please specify the year"));
        }

        match (date_of_birth, year_of_study) {
            (Some(date_of_birth), Some(year_of_study)) => Ok(ProfileRow {
                id: None,
                username: self.username.clone(),
                email: self.email.clone(),
                address: self.address.clone(),
                phone: self.phone.clone(),
                gender: self.gender,
                date_of_birth,
                year_of_study,
                expertise_tags: split_tags(&self.expertise_tags),
                accepted_terms: self.accepted_terms,
                photo_url,
            }),
            _ => Err(ValidationRejection::InvalidFields(errors)),
        }
    }
}

/// Display-ready snapshot of the last known profile
///
/// Field names match the blob the web form keeps under the same cache key
/// (`date`, `year`, `expertise`, `terms`, `file`), so entries written by
/// either client pre-fill the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedForm {
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    /// Always empty. Never read back from storage.
    #[serde(default, skip_deserializing)]
    password: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "date", alias = "dateOfBirth", deserialize_with = "cached_date")]
    pub date_of_birth: String,
    #[serde(rename = "year", alias = "yearOfStudy", deserialize_with = "string_or_number")]
    pub year_of_study: String,
    #[serde(rename = "expertise", alias = "expertiseTags", default)]
    pub expertise_tags: String,
    #[serde(rename = "terms", alias = "acceptedTerms", default)]
    pub accepted_terms: bool,
    #[serde(rename = "file", alias = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Timestamps (`2000-01-31T00:00:00.000Z`) are cut down to the date the
/// form edits. Anything unparseable is kept verbatim for the form to flag.
fn cached_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match parse_profile_date(&raw) {
        Some(date) => date.format(profile_date::FORMAT).to_string(),
        None => raw,
    })
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(text) => text,
        Year::Number(number) => number.to_string(),
    })
}

impl CachedForm {
    /// Project a stored row into the cache representation.
    pub fn from_row(row: &ProfileRow) -> Self {
        Self {
            username: row.username.clone(),
            email: row.email.clone(),
            address: row.address.clone(),
            phone: row.phone.clone(),
            password: String::new(),
            gender: row.gender,
            date_of_birth: row.date_of_birth.format(profile_date::FORMAT).to_string(),
            year_of_study: row.year_of_study.to_string(),
            expertise_tags: join_tags(&row.expertise_tags),
            accepted_terms: row.accepted_terms,
            photo_url: row.photo_url.clone(),
        }
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Pre-fill values for the form. No password, no photo selected.
    pub fn to_form_input(&self) -> FormInput {
        FormInput {
            username: self.username.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            password: String::new(),
            gender: self.gender,
            date_of_birth: self.date_of_birth.clone(),
            year_of_study: self.year_of_study.clone(),
            expertise_tags: self.expertise_tags.clone(),
            accepted_terms: self.accepted_terms,
            photo: None,
        }
    }
}
