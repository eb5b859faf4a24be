//! Person use-cases behind the `PersonsCommand` and `PersonsQuery` ports.
//!
//! Creation is cache-aside: look the given name up in the stats cache, fall
//! back to concurrent enrichment on any cache error, store complete results
//! for later, then persist. Cache writes are best effort and never fail a
//! creation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    PersonRepository, PersonRepositoryError, PersonStatsCache, PersonStatsCacheKey, PersonsCommand,
    PersonsQuery,
};
use crate::domain::{
    EnrichmentOrchestrator, EnrichmentResult, Error, Person, PersonChanges, PersonDraft,
    PersonFilter, PersonId,
};

/// Default lifetime of cached demographic stats.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60 * 60);

fn map_repository_error(error: PersonRepositoryError) -> Error {
    match error {
        PersonRepositoryError::NotFound { id }
        | PersonRepositoryError::NothingToUpdate { id }
        | PersonRepositoryError::NothingToDelete { id } => {
            Error::not_found(format!("person {id} not found"))
        }
        PersonRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("person repository unavailable: {message}"))
        }
        PersonRepositoryError::Query { message } => {
            Error::internal(format!("person repository error: {message}"))
        }
    }
}

/// Person service implementing both driving ports.
pub struct PersonService<R, C> {
    repository: Arc<R>,
    cache: Arc<C>,
    enrichment: EnrichmentOrchestrator,
    cache_ttl: Duration,
}

impl<R, C> PersonService<R, C> {
    /// Create a service over a repository, a stats cache, and an orchestrator.
    pub fn new(repository: Arc<R>, cache: Arc<C>, enrichment: EnrichmentOrchestrator) -> Self {
        Self {
            repository,
            cache,
            enrichment,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    /// Override how long resolved stats stay cached.
    #[must_use]
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }
}

impl<R, C> PersonService<R, C>
where
    C: PersonStatsCache,
{
    async fn resolve_demographics(&self, name: &str) -> Result<EnrichmentResult, Error> {
        let key = PersonStatsCacheKey::new(name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        match self.cache.get(&key).await {
            Ok(stats) => {
                debug!(%key, "person stats cache hit");
                return Ok(EnrichmentResult::from(stats));
            }
            Err(error) if error.is_miss() => debug!(%key, "person stats cache miss"),
            Err(error) => warn!(%key, %error, "person stats cache read failed; enriching"),
        }

        let enriched = self.enrichment.enrich(name).await;
        if let Some(stats) = enriched.stats() {
            if let Err(error) = self.cache.set(&key, &stats, self.cache_ttl).await {
                warn!(%key, %error, "person stats cache write failed");
            }
        }
        Ok(enriched)
    }
}

#[async_trait]
impl<R, C> PersonsCommand for PersonService<R, C>
where
    R: PersonRepository,
    C: PersonStatsCache,
{
    async fn create_person(&self, draft: PersonDraft) -> Result<Person, Error> {
        let enrichment = self.resolve_demographics(draft.name()).await?;
        let person = self
            .repository
            .create(&draft, &enrichment)
            .await
            .map_err(map_repository_error)?;
        info!(id = %person.id(), "person created");
        Ok(person)
    }

    async fn update_person(&self, id: PersonId, changes: PersonChanges) -> Result<Person, Error> {
        let current = self
            .repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?;
        let merged = current.with_changes(changes);
        let person = self
            .repository
            .update(&merged)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "person updated");
        Ok(person)
    }

    async fn delete_person(&self, id: PersonId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "person deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, C> PersonsQuery for PersonService<R, C>
where
    R: PersonRepository,
    C: PersonStatsCache,
{
    async fn get_person(&self, id: PersonId) -> Result<Person, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn list_persons(
        &self,
        filter: PersonFilter,
        page: PageRequest,
    ) -> Result<Vec<Person>, Error> {
        self.repository
            .list(&filter, page)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "person_service_tests.rs"]
mod tests;
