//! Profile record types
//!
//! `ProfileRow` is the storage form of a user profile as the table API sees
//! it. Column names follow the remote table (`file`, `date`, `year`,
//! `expertise`, `terms`). There is no password column: a password can never
//! reach the record store through this type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_enum_conversions;

/// Closed set of gender choices offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "female")]
    Female,
    #[serde(rename = "Prefer Not to say")]
    PreferNotToSay,
}

impl_domain_enum_conversions!(Gender {
    Male => "male",
    Female => "female",
    PreferNotToSay => "Prefer Not to say",
});

/// One row of the profile table, keyed by `email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Server-generated identifier, read only
    #[serde(default, skip_serializing)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(rename = "date", with = "profile_date")]
    pub date_of_birth: NaiveDate,
    #[serde(rename = "year")]
    pub year_of_study: i32,
    #[serde(rename = "expertise", default, deserialize_with = "null_as_empty")]
    pub expertise_tags: Vec<String>,
    #[serde(rename = "terms", default)]
    pub accepted_terms: bool,
    /// `None` leaves the column untouched on update
    #[serde(rename = "file", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Reference to a row written by the record store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRef {
    pub id: Option<i64>,
}

/// Split the comma-joined transport form into the stored sequence.
///
/// Elements are kept verbatim (no trimming). An empty string is an empty
/// sequence.
pub fn split_tags(transport: &str) -> Vec<String> {
    if transport.is_empty() {
        return Vec::new();
    }
    transport.split(',').map(str::to_string).collect()
}

/// Join the stored sequence back into the comma-joined transport form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

/// Parse a date as either `YYYY-MM-DD` or an RFC 3339 timestamp, which is
/// what the table returns for date columns stored as timestamps.
pub fn parse_profile_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, profile_date::FORMAT) {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) mod profile_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_profile_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_row() -> ProfileRow {
        ProfileRow {
            id: None,
            username: "bob".into(),
            email: "a@b.com".into(),
            address: "221B Baker Street".into(),
            phone: "+441234567890".into(),
            gender: Gender::Male,
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 31).unwrap(),
            year_of_study: 2021,
            expertise_tags: vec!["go".into(), "rust".into()],
            accepted_terms: true,
            photo_url: Some("https://cdn.example.co/photo".into()),
        }
    }

    #[test]
    fn tags_round_trip_without_embedded_commas() {
        let tags = vec!["go".to_string(), "rust".to_string(), " spaced ".to_string()];
        assert_eq!(split_tags(&join_tags(&tags)), tags);
        assert!(split_tags("").is_empty());
        assert_eq!(join_tags(&[]), "");
    }

    #[test]
    fn row_serializes_with_table_column_names() {
        let value = serde_json::to_value(sample_row()).unwrap();
        assert_eq!(value["expertise"], json!(["go", "rust"]));
        assert_eq!(value["year"], json!(2021));
        assert_eq!(value["date"], json!("2000-01-31"));
        assert_eq!(value["terms"], json!(true));
        assert_eq!(value["file"], json!("https://cdn.example.co/photo"));
        assert!(value.get("id").is_none());
        assert!(value.get("password").is_none());
    }

    #[test]
    fn row_without_photo_omits_file_column() {
        let row = ProfileRow { photo_url: None, ..sample_row() };
        let value = serde_json::to_value(row).unwrap();
        assert!(value.get("file").is_none());
    }

    #[test]
    fn row_reads_timestamp_dates_and_server_columns() {
        let row: ProfileRow = serde_json::from_value(json!({
            "id": 1,
            "created_at": "2024-05-21T01:54:00.88049+00:00",
            "username": "surya1",
            "email": "s@example.com",
            "phone": "09160465099",
            "gender": "male",
            "terms": true,
            "file": "https://cdn.example.co/photo",
            "date": "2024-05-21T00:00:00+00:00",
            "year": 2021,
            "expertise": ["nextJs"],
            "password": null,
            "address": "Ns Palya , Btm Layout 2nd stage"
        }))
        .unwrap();

        assert_eq!(row.id, Some(1));
        assert_eq!(row.date_of_birth, NaiveDate::from_ymd_opt(2024, 5, 21).unwrap());
        assert_eq!(row.expertise_tags, vec!["nextJs".to_string()]);
    }

    #[test]
    fn null_expertise_reads_as_empty() {
        let mut value = serde_json::to_value(sample_row()).unwrap();
        value["expertise"] = serde_json::Value::Null;
        let row: ProfileRow = serde_json::from_value(value).unwrap();
        assert!(row.expertise_tags.is_empty());
    }

    #[test]
    fn gender_uses_form_strings() {
        assert_eq!(serde_json::to_value(Gender::PreferNotToSay).unwrap(), "Prefer Not to say");
        assert_eq!("Female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(Gender::default(), Gender::Male);
    }
}
