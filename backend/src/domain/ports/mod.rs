//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod demographic_source;
mod person_repository;
mod person_stats_cache;
mod persons_command;
mod persons_query;

pub use cache_key::{PersonStatsCacheKey, PersonStatsCacheKeyValidationError};
#[cfg(test)]
pub use demographic_source::{MockAgeSource, MockGenderSource, MockNationalitySource};
pub use demographic_source::{
    AgeSource, CountryProbability, DemographicSourceError, GenderSource, NationalitySource,
};
#[cfg(test)]
pub use person_repository::MockPersonRepository;
pub use person_repository::{PersonRepository, PersonRepositoryError};
#[cfg(test)]
pub use person_stats_cache::MockPersonStatsCache;
pub use person_stats_cache::{PersonStatsCache, PersonStatsCacheError};
#[cfg(test)]
pub use persons_command::MockPersonsCommand;
pub use persons_command::{FixturePersonsCommand, PersonsCommand};
#[cfg(test)]
pub use persons_query::MockPersonsQuery;
pub use persons_query::{FixturePersonsQuery, PersonsQuery};
