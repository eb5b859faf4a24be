//! Person aggregate and the value types used to create, change, and filter it.
//!
//! Optional attributes are `Option`s: `None` is "unknown" and is stored as
//! SQL `NULL`. Constructors fold empty strings into `None` so an empty string
//! and an unknown value are never two different states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised by person constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonValidationError {
    /// Identifiers are assigned by the database and start at one.
    #[error("person id must be positive, got {0}")]
    NonPositiveId(i64),
    /// A mandatory text field was empty once trimmed.
    #[error("{field} must not be blank")]
    Blank {
        /// Field name as exposed to clients.
        field: &'static str,
    },
}

/// Repository-assigned person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PersonId(i64);

impl PersonId {
    /// Wrap a raw identifier, rejecting zero and negative values.
    pub fn new(raw: i64) -> Result<Self, PersonValidationError> {
        if raw <= 0 {
            return Err(PersonValidationError::NonPositiveId(raw));
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for PersonId {
    type Error = PersonValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonId> for i64 {
    fn from(value: PersonId) -> Self {
        value.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn required(field: &'static str, value: String) -> Result<String, PersonValidationError> {
    if value.trim().is_empty() {
        return Err(PersonValidationError::Blank { field });
    }
    Ok(value)
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Validated input for creating a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonDraft {
    name: String,
    surname: String,
    patronymic: Option<String>,
}

impl PersonDraft {
    /// Validate creation input.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PersonDraft;
    ///
    /// let draft = PersonDraft::new("Oliver", "Smith", Some(String::new())).expect("valid draft");
    /// assert_eq!(draft.name(), "Oliver");
    /// assert_eq!(draft.patronymic(), None);
    /// ```
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: Option<String>,
    ) -> Result<Self, PersonValidationError> {
        Ok(Self {
            name: required("name", name.into())?,
            surname: required("surname", surname.into())?,
            patronymic: optional(patronymic),
        })
    }

    /// Given name; also the enrichment and cache key.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Family name.
    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    /// Patronymic, when known.
    pub fn patronymic(&self) -> Option<&str> {
        self.patronymic.as_deref()
    }
}

/// Field values for rebuilding a [`Person`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub id: PersonId,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted person with inferred demographic attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: PersonId,
    name: String,
    surname: String,
    patronymic: Option<String>,
    age: Option<u32>,
    nationality: Option<String>,
    gender: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Person {
    /// Build a person from stored fields.
    pub fn new(record: PersonRecord) -> Result<Self, PersonValidationError> {
        Ok(Self {
            id: record.id,
            name: required("name", record.name)?,
            surname: required("surname", record.surname)?,
            patronymic: optional(record.patronymic),
            age: record.age,
            nationality: optional(record.nationality),
            gender: optional(record.gender),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    pub fn patronymic(&self) -> Option<&str> {
        self.patronymic.as_deref()
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn nationality(&self) -> Option<&str> {
        self.nationality.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overlay every provided field of `changes` onto this person.
    ///
    /// Absent fields keep their stored value, so a change can never clear an
    /// attribute back to unknown.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Person, PersonChanges, PersonId, PersonRecord};
    /// use chrono::Utc;
    ///
    /// let now = Utc::now();
    /// let person = Person::new(PersonRecord {
    ///     id: PersonId::new(1).expect("valid id"),
    ///     name: "Oliver".into(),
    ///     surname: "Smith".into(),
    ///     patronymic: None,
    ///     age: Some(32),
    ///     nationality: Some("GB".into()),
    ///     gender: Some("male".into()),
    ///     created_at: now,
    ///     updated_at: now,
    /// })
    /// .expect("valid person");
    ///
    /// let changed = person.with_changes(PersonChanges {
    ///     age: Some(33),
    ///     ..PersonChanges::default()
    /// });
    /// assert_eq!(changed.age(), Some(33));
    /// assert_eq!(changed.nationality(), Some("GB"));
    /// ```
    #[must_use]
    pub fn with_changes(self, changes: PersonChanges) -> Self {
        let PersonChanges {
            name,
            surname,
            patronymic,
            age,
            nationality,
            gender,
        } = changes;
        Self {
            name: optional(name).unwrap_or(self.name),
            surname: optional(surname).unwrap_or(self.surname),
            patronymic: optional(patronymic).or(self.patronymic),
            age: age.filter(|age| *age > 0).or(self.age),
            nationality: optional(nationality).or(self.nationality),
            gender: optional(gender).or(self.gender),
            ..self
        }
    }
}

/// Partial update request. `None`, an empty string, or an age of `0` keeps
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
}

/// Optional equality predicates for listing people; `None` skips a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
}

impl PersonFilter {
    /// Whether `person` satisfies every set predicate.
    pub fn matches(&self, person: &Person) -> bool {
        fn text(expected: Option<&String>, actual: Option<&str>) -> bool {
            expected.is_none_or(|value| actual == Some(value.as_str()))
        }

        text(self.name.as_ref(), Some(person.name()))
            && text(self.surname.as_ref(), Some(person.surname()))
            && text(self.patronymic.as_ref(), person.patronymic())
            && self.age.is_none_or(|age| person.age() == Some(age))
            && text(self.nationality.as_ref(), person.nationality())
            && text(self.gender.as_ref(), person.gender())
    }
}
