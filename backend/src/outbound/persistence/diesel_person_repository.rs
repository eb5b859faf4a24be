//! PostgreSQL-backed `PersonRepository` implementation using Diesel ORM.
//!
//! Writes run inside a transaction. An update or delete that touches no row
//! rolls back and reports `NothingToUpdate` / `NothingToDelete`. Timestamps
//! come from the injected clock rather than database defaults.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use mockable::Clock;
use pagination::PageRequest;
use tracing::debug;

use crate::domain::ports::{PersonRepository, PersonRepositoryError};
use crate::domain::{
    EnrichmentResult, Person, PersonDraft, PersonFilter, PersonId, PersonRecord,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPersonRow, PersonRow, PersonUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::people;

/// Diesel-backed implementation of the `PersonRepository` port.
#[derive(Clone)]
pub struct DieselPersonRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPersonRepository {
    /// Create a repository over `pool`, stamping rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

/// Outcome of a transactional write that must touch exactly one row.
#[derive(Debug)]
enum WriteError {
    NoRows,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for WriteError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> PersonRepositoryError {
    map_basic_pool_error(error, PersonRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PersonRepositoryError {
    map_basic_diesel_error(
        error,
        PersonRepositoryError::query,
        PersonRepositoryError::connection,
    )
}

fn map_write_error(
    error: WriteError,
    no_rows: impl FnOnce() -> PersonRepositoryError,
) -> PersonRepositoryError {
    match error {
        WriteError::NoRows => no_rows(),
        WriteError::Diesel(error) => map_diesel_error(error),
    }
}

fn age_to_db(age: Option<u32>) -> Result<Option<i32>, PersonRepositoryError> {
    age.map(i32::try_from)
        .transpose()
        .map_err(|_| PersonRepositoryError::query("age exceeds the storable range"))
}

fn row_to_person(row: PersonRow) -> Result<Person, PersonRepositoryError> {
    let id = PersonId::new(row.id)
        .map_err(|err| PersonRepositoryError::query(format!("stored person id: {err}")))?;
    let age = row
        .age
        .map(u32::try_from)
        .transpose()
        .map_err(|_| PersonRepositoryError::query(format!("stored age for person {id} is negative")))?;
    Person::new(PersonRecord {
        id,
        name: row.name,
        surname: row.surname,
        patronymic: row.patronymic,
        age,
        nationality: row.nationality,
        gender: row.gender,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| PersonRepositoryError::query(format!("stored person {id}: {err}")))
}

fn page_bounds(page: PageRequest) -> Result<(i64, Option<i64>), PersonRepositoryError> {
    let offset = page
        .offset_i64()
        .map_err(|err| PersonRepositoryError::query(err.to_string()))?;
    let limit = page
        .limit_i64()
        .map_err(|err| PersonRepositoryError::query(err.to_string()))?;
    Ok((offset, limit))
}

#[async_trait]
impl PersonRepository for DieselPersonRepository {
    async fn create(
        &self,
        draft: &PersonDraft,
        enrichment: &EnrichmentResult,
    ) -> Result<Person, PersonRepositoryError> {
        let now = self.clock.utc();
        let new_row = NewPersonRow {
            name: draft.name(),
            surname: draft.surname(),
            patronymic: draft.patronymic(),
            age: age_to_db(enrichment.age)?,
            nationality: enrichment.nationality.as_deref(),
            gender: enrichment.gender.as_deref(),
            created_at: now,
            updated_at: now,
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(people::table)
                        .values(&new_row)
                        .returning(PersonRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(id = row.id, "person row inserted");
        row_to_person(row)
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Person, PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PersonRow> = people::table
            .find(id.get())
            .select(PersonRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map_or_else(
            || Err(PersonRepositoryError::not_found(id)),
            row_to_person,
        )
    }

    async fn update(&self, person: &Person) -> Result<Person, PersonRepositoryError> {
        let id = person.id();
        let changes = PersonUpdate {
            name: person.name(),
            surname: person.surname(),
            patronymic: person.patronymic(),
            age: age_to_db(person.age())?,
            nationality: person.nationality(),
            gender: person.gender(),
            updated_at: self.clock.utc(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<_, WriteError, _>(|conn| {
                async move {
                    diesel::update(people::table.find(id.get()))
                        .set(&changes)
                        .returning(PersonRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?
                        .ok_or(WriteError::NoRows)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_write_error(err, || PersonRepositoryError::nothing_to_update(id)))?;

        row_to_person(row)
    }

    async fn delete(&self, id: PersonId) -> Result<(), PersonRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, WriteError, _>(|conn| {
            async move {
                let deleted = diesel::delete(people::table.find(id.get()))
                    .execute(conn)
                    .await?;
                if deleted == 0 {
                    return Err(WriteError::NoRows);
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_write_error(err, || PersonRepositoryError::nothing_to_delete(id)))
    }

    async fn list(
        &self,
        filter: &PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, PersonRepositoryError> {
        let (offset, limit) = page_bounds(page)?;
        let age = age_to_db(filter.age)?;

        let mut query = people::table.select(PersonRow::as_select()).into_boxed();
        if let Some(name) = filter.name.as_deref() {
            query = query.filter(people::name.eq(name));
        }
        if let Some(surname) = filter.surname.as_deref() {
            query = query.filter(people::surname.eq(surname));
        }
        if let Some(patronymic) = filter.patronymic.as_deref() {
            query = query.filter(people::patronymic.eq(patronymic));
        }
        if let Some(age) = age {
            query = query.filter(people::age.eq(age));
        }
        if let Some(nationality) = filter.nationality.as_deref() {
            query = query.filter(people::nationality.eq(nationality));
        }
        if let Some(gender) = filter.gender.as_deref() {
            query = query.filter(people::gender.eq(gender));
        }
        query = query.order(people::id.asc()).offset(offset);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PersonRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_person).collect()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping; database behaviour is covered by the
    //! embedded PostgreSQL suite in `tests/diesel_person_repository.rs`.
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> PersonRow {
        let timestamp = Utc
            .with_ymd_and_hms(2026, 4, 2, 10, 30, 0)
            .single()
            .expect("valid fixture timestamp");
        PersonRow {
            id: 7,
            name: "Oliver".to_owned(),
            surname: "Smith".to_owned(),
            patronymic: None,
            age: Some(32),
            nationality: Some("GB".to_owned()),
            gender: Some("male".to_owned()),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[rstest]
    fn row_converts_to_person(row: PersonRow) {
        let person = row_to_person(row).expect("valid row");

        assert_eq!(person.id().get(), 7);
        assert_eq!(person.age(), Some(32));
        assert_eq!(person.patronymic(), None);
        assert_eq!(person.nationality(), Some("GB"));
    }

    #[rstest]
    fn negative_stored_age_is_a_query_error(mut row: PersonRow) {
        row.age = Some(-4);

        let err = row_to_person(row).expect_err("negative age");

        assert!(matches!(err, PersonRepositoryError::Query { .. }), "{err}");
    }

    #[rstest]
    fn age_beyond_i32_is_rejected_before_writing() {
        assert_eq!(age_to_db(Some(40)), Ok(Some(40)));
        assert_eq!(age_to_db(None), Ok(None));
        assert!(age_to_db(Some(u32::MAX)).is_err());
    }

    #[rstest]
    fn zero_row_writes_map_to_nothing_to_update() {
        let id = PersonId::new(3).expect("valid id");

        let err = map_write_error(WriteError::NoRows, || {
            PersonRepositoryError::nothing_to_update(id)
        });

        assert_eq!(err, PersonRepositoryError::nothing_to_update(id));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, PersonRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unbounded_page_has_no_limit() {
        assert_eq!(page_bounds(PageRequest::new(3, 0)), Ok((3, None)));
        assert_eq!(page_bounds(PageRequest::new(1, 2)), Ok((1, Some(2))));
    }
}
