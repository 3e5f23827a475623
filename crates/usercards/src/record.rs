//! The user record and its form fields.

use serde::{Deserialize, Serialize};

/// One field of a [`Record`], in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// First name.
    Name,
    /// Family name.
    SecondName,
    /// Date of birth, kept as entered.
    DateOfBirth,
    /// Email address; the record key.
    Email,
}

impl Field {
    /// All fields in the order the form presents them.
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::SecondName,
        Field::DateOfBirth,
        Field::Email,
    ];

    /// The serialized name of this field, also used as the input's element id.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::SecondName => "secondName",
            Self::DateOfBirth => "dateOfBirth",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A user record.
///
/// `email` identifies the record. Missing fields in persisted data
/// deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Record {
    /// First name.
    pub name: String,
    /// Family name.
    pub second_name: String,
    /// Date of birth.
    pub date_of_birth: String,
    /// Email address.
    pub email: String,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        second_name: impl Into<String>,
        date_of_birth: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            second_name: second_name.into(),
            date_of_birth: date_of_birth.into(),
            email: email.into(),
        }
    }

    /// Build a record from values in form order.
    #[must_use]
    pub fn from_values([name, second_name, date_of_birth, email]: [String; 4]) -> Self {
        Self {
            name,
            second_name,
            date_of_birth,
            email,
        }
    }

    /// The values in form order.
    #[must_use]
    pub fn values(&self) -> [&str; 4] {
        [
            &self.name,
            &self.second_name,
            &self.date_of_birth,
            &self.email,
        ]
    }

    /// Get a single field value.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::SecondName => &self.second_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Email => &self.email,
        }
    }

    /// Fields that are empty. A record is accepted only when this is empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    /// Check that every field is non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        Record::new("A", "B", "2000-01-01", "a@x.com")
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"A","secondName":"B","dateOfBirth":"2000-01-01","email":"a@x.com"}"#
        );
    }

    #[test]
    fn test_missing_keys_deserialize_as_empty() {
        let record: Record = serde_json::from_str(r#"{"name":"A"}"#).unwrap();
        assert_eq!(record.name, "A");
        assert_eq!(record.email, "");
        assert_eq!(
            record.missing_fields(),
            vec![Field::SecondName, Field::DateOfBirth, Field::Email]
        );
    }

    #[test]
    fn test_is_complete() {
        assert!(sample().is_complete());

        let mut record = sample();
        record.date_of_birth.clear();
        assert!(!record.is_complete());
    }

    #[test]
    fn test_whitespace_counts_as_present() {
        let record = Record::new(" ", "B", "C", "d");
        assert!(record.is_complete());
    }

    #[test]
    fn test_values_follow_form_order() {
        let record = sample();
        assert_eq!(record.values(), ["A", "B", "2000-01-01", "a@x.com"]);
        for (field, value) in Field::ALL.into_iter().zip(record.values()) {
            assert_eq!(record.get(field), value);
        }
    }

    #[test]
    fn test_from_values() {
        let record = Record::from_values([
            "A".to_string(),
            "B".to_string(),
            "2000-01-01".to_string(),
            "a@x.com".to_string(),
        ]);
        assert_eq!(record, sample());
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(Field::SecondName.key(), "secondName");
        assert_eq!(Field::DateOfBirth.to_string(), "dateOfBirth");
    }
}
