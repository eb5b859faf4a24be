//! Driving port for person reads.

use async_trait::async_trait;
use pagination::PageRequest;

use super::persons_command::{fixture_id, fixture_person};
use crate::domain::{Error, Person, PersonDraft, PersonFilter, PersonId};

/// Driving port for reading people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsQuery: Send + Sync {
    /// Fetch one person.
    async fn get_person(&self, id: PersonId) -> Result<Person, Error>;

    /// List people matching `filter`, ordered by id and paged by `page`.
    async fn list_persons(
        &self,
        filter: PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, Error>;
}

/// Fixture query exposing a single stored person, Oliver Smith, with id `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePersonsQuery;

impl FixturePersonsQuery {
    fn stored() -> Result<Person, Error> {
        let draft = PersonDraft::new("Oliver", "Smith", None)
            .map_err(|err| Error::internal(err.to_string()))?;
        fixture_person(fixture_id()?, &draft)
    }
}

#[async_trait]
impl PersonsQuery for FixturePersonsQuery {
    async fn get_person(&self, id: PersonId) -> Result<Person, Error> {
        let person = Self::stored()?;
        if person.id() != id {
            return Err(Error::not_found(format!("person {id} not found")));
        }
        Ok(person)
    }

    async fn list_persons(
        &self,
        filter: PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, Error> {
        let stored = Self::stored()?;
        Ok(page.apply(std::iter::once(stored).filter(|person| filter.matches(person))))
    }
}
