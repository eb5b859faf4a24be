//! Port for person persistence.
//!
//! Every operation is atomic. Writes that affect zero rows roll back and
//! report `NothingToUpdate` / `NothingToDelete` instead of succeeding silently.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{EnrichmentResult, Person, PersonDraft, PersonFilter, PersonId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by person repository adapters.
    pub enum PersonRepositoryError {
        /// No row exists for the identifier.
        NotFound { id: PersonId } => "person {id} not found",
        /// An update matched no row.
        NothingToUpdate { id: PersonId } => "nothing to update for person {id}",
        /// A delete matched no row.
        NothingToDelete { id: PersonId } => "nothing to delete for person {id}",
        /// Repository connection could not be established.
        Connection { message: String } => "person repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "person repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Insert a person with its enrichment; assigns id and timestamps.
    async fn create(
        &self,
        draft: &PersonDraft,
        enrichment: &EnrichmentResult,
    ) -> Result<Person, PersonRepositoryError>;

    /// Load a person by identifier.
    async fn find_by_id(&self, id: PersonId) -> Result<Person, PersonRepositoryError>;

    /// Overwrite every mutable column of the stored row and bump `updated_at`.
    async fn update(&self, person: &Person) -> Result<Person, PersonRepositoryError>;

    /// Remove a person.
    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError>;

    /// List people matching `filter`, ordered by ascending id, paged by `page`.
    async fn list(
        &self,
        filter: &PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, PersonRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_row_errors_name_the_person() {
        let id = PersonId::new(9).expect("valid id");
        assert_eq!(
            PersonRepositoryError::nothing_to_update(id).to_string(),
            "nothing to update for person 9"
        );
        assert_eq!(
            PersonRepositoryError::nothing_to_delete(id).to_string(),
            "nothing to delete for person 9"
        );
    }
}
