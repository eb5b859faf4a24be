//! Demographic projection cached per given name.
//!
//! [`PersonStats`] holds only fully-resolved attributes; it is built from an
//! [`EnrichmentResult`](crate::domain::EnrichmentResult) when all three of its
//! fields are known. The serialised form is the cache wire format:
//! `{"age":32,"nationality":"GB","gender":"male"}`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised by [`PersonStats::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonStatsValidationError {
    /// Age was zero, which stands for "no estimate".
    #[error("age must be greater than zero")]
    UnknownAge,
    /// Nationality was blank.
    #[error("nationality must not be blank")]
    BlankNationality,
    /// Gender was blank.
    #[error("gender must not be blank")]
    BlankGender,
}

/// Fully-resolved demographic attributes for a given name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersonStatsDto", into = "PersonStatsDto")]
pub struct PersonStats {
    age: u32,
    nationality: String,
    gender: String,
}

impl PersonStats {
    /// Validate and build a stats projection.
    pub fn new(
        age: u32,
        nationality: impl Into<String>,
        gender: impl Into<String>,
    ) -> Result<Self, PersonStatsValidationError> {
        let nationality = nationality.into();
        let gender = gender.into();
        if age == 0 {
            return Err(PersonStatsValidationError::UnknownAge);
        }
        if nationality.trim().is_empty() {
            return Err(PersonStatsValidationError::BlankNationality);
        }
        if gender.trim().is_empty() {
            return Err(PersonStatsValidationError::BlankGender);
        }
        Ok(Self {
            age,
            nationality,
            gender,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn nationality(&self) -> &str {
        self.nationality.as_str()
    }

    pub fn gender(&self) -> &str {
        self.gender.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersonStatsDto {
    age: u32,
    nationality: String,
    gender: String,
}

impl From<PersonStats> for PersonStatsDto {
    fn from(value: PersonStats) -> Self {
        Self {
            age: value.age,
            nationality: value.nationality,
            gender: value.gender,
        }
    }
}

impl TryFrom<PersonStatsDto> for PersonStats {
    type Error = PersonStatsValidationError;

    fn try_from(value: PersonStatsDto) -> Result<Self, Self::Error> {
        Self::new(value.age, value.nationality, value.gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn wire_format_orders_age_nationality_gender() {
        let stats = PersonStats::new(32, "GB", "male").expect("valid stats");
        let encoded = serde_json::to_string(&stats).expect("serialise stats");
        assert_eq!(encoded, r#"{"age":32,"nationality":"GB","gender":"male"}"#);
    }

    #[rstest]
    #[case(json!({"age": 32, "nationality": "", "gender": "male"}))]
    #[case(json!({"age": 32, "nationality": "GB", "gender": " "}))]
    #[case(json!({"age": -1, "nationality": "GB", "gender": "male"}))]
    #[case(json!({"age": 0, "nationality": "GB", "gender": "male"}))]
    #[case(json!({"age": 32, "gender": "male"}))]
    fn rejects_incomplete_payloads(#[case] payload: serde_json::Value) {
        assert!(serde_json::from_value::<PersonStats>(payload).is_err());
    }
}
