//! Driving port for person mutations.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::domain::{Error, Person, PersonChanges, PersonDraft, PersonId, PersonRecord};

/// Driving port for creating, changing, and removing people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsCommand: Send + Sync {
    /// Create a person, enriching it with demographic attributes.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use backend::domain::PersonDraft;
    /// # use backend::domain::ports::{FixturePersonsCommand, PersonsCommand};
    /// # async fn example() -> Result<(), backend::domain::Error> {
    /// let draft = PersonDraft::new("Oliver", "Smith", None)
    ///     .map_err(|err| backend::domain::Error::invalid_request(err.to_string()))?;
    /// let person = FixturePersonsCommand.create_person(draft).await?;
    /// assert_eq!(person.name(), "Oliver");
    /// # Ok(())
    /// # }
    /// ```
    async fn create_person(&self, draft: PersonDraft) -> Result<Person, Error>;

    /// Merge `changes` into the stored person and persist the result.
    async fn update_person(&self, id: PersonId, changes: PersonChanges) -> Result<Person, Error>;

    /// Delete a person.
    async fn delete_person(&self, id: PersonId) -> Result<(), Error>;
}

/// Fixture command for handler tests that do not need persistence.
///
/// Creation always yields id `1`; only id `1` can be updated or deleted.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePersonsCommand;

pub(crate) fn fixture_person(id: PersonId, draft: &PersonDraft) -> Result<Person, Error> {
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
        .single()
        .ok_or_else(|| Error::internal("fixture timestamp is ambiguous"))?;
    Person::new(PersonRecord {
        id,
        name: draft.name().to_owned(),
        surname: draft.surname().to_owned(),
        patronymic: draft.patronymic().map(str::to_owned),
        age: Some(32),
        nationality: Some("GB".to_owned()),
        gender: Some("male".to_owned()),
        created_at,
        updated_at: created_at,
    })
    .map_err(|err| Error::internal(err.to_string()))
}

pub(crate) fn fixture_id() -> Result<PersonId, Error> {
    PersonId::new(1).map_err(|err| Error::internal(err.to_string()))
}

#[async_trait]
impl PersonsCommand for FixturePersonsCommand {
    async fn create_person(&self, draft: PersonDraft) -> Result<Person, Error> {
        fixture_person(fixture_id()?, &draft)
    }

    async fn update_person(&self, id: PersonId, changes: PersonChanges) -> Result<Person, Error> {
        if id != fixture_id()? {
            return Err(Error::not_found(format!("person {id} not found")));
        }
        let draft = PersonDraft::new("Oliver", "Smith", None)
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(fixture_person(id, &draft)?.with_changes(changes))
    }

    async fn delete_person(&self, id: PersonId) -> Result<(), Error> {
        if id != fixture_id()? {
            return Err(Error::not_found(format!("person {id} not found")));
        }
        Ok(())
    }
}
