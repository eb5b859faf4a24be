//! Concurrent demographic enrichment.
//!
//! [`EnrichmentOrchestrator::enrich`] queries the age, gender, and nationality
//! sources at the same time, each under its own deadline, and waits for all
//! three before merging. A failed or slow source only leaves its own field
//! unknown; enrichment as a whole never fails.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::PersonStats;
use crate::domain::ports::{
    AgeSource, CountryProbability, DemographicSourceError, GenderSource, NationalitySource,
};

/// Demographic attributes resolved for one name; any field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentResult {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
}

impl EnrichmentResult {
    /// Result with every attribute unknown.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Cacheable projection, present only when all three fields are known.
    /// An age of zero counts as unknown.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::EnrichmentResult;
    ///
    /// let partial = EnrichmentResult { age: Some(32), gender: None, nationality: Some("GB".into()) };
    /// assert!(partial.stats().is_none());
    /// ```
    pub fn stats(&self) -> Option<PersonStats> {
        let age = self.age.filter(|age| *age > 0)?;
        let gender = self.gender.as_deref()?;
        let nationality = self.nationality.as_deref()?;
        PersonStats::new(age, nationality, gender).ok()
    }
}

impl From<PersonStats> for EnrichmentResult {
    fn from(value: PersonStats) -> Self {
        Self {
            age: Some(value.age()),
            gender: Some(value.gender().to_owned()),
            nationality: Some(value.nationality().to_owned()),
        }
    }
}

/// The three lookup ports the orchestrator fans out to.
#[derive(Clone)]
pub struct DemographicSources {
    pub age: Arc<dyn AgeSource>,
    pub gender: Arc<dyn GenderSource>,
    pub nationality: Arc<dyn NationalitySource>,
}

/// Fans a name out to every demographic source and merges the answers.
#[derive(Clone)]
pub struct EnrichmentOrchestrator {
    sources: DemographicSources,
    lookup_timeout: Duration,
}

impl EnrichmentOrchestrator {
    /// Create an orchestrator applying `lookup_timeout` to each source.
    pub fn new(sources: DemographicSources, lookup_timeout: Duration) -> Self {
        Self {
            sources,
            lookup_timeout,
        }
    }

    /// Per-source deadline.
    pub fn lookup_timeout(&self) -> Duration {
        self.lookup_timeout
    }

    /// Resolve age, gender, and nationality for `name`.
    ///
    /// Returns once every source has answered, failed, or hit its deadline,
    /// so the call is bounded by the lookup timeout.
    pub async fn enrich(&self, name: &str) -> EnrichmentResult {
        let (age, gender, countries) = tokio::join!(
            self.bounded("age", self.sources.age.age(name)),
            self.bounded("gender", self.sources.gender.gender(name)),
            self.bounded("nationality", self.sources.nationality.nationalities(name)),
        );

        let result = EnrichmentResult {
            age: age.flatten().filter(|age| *age > 0),
            gender: gender.flatten().filter(|value| !value.trim().is_empty()),
            nationality: countries.and_then(|candidates| most_likely_country(&candidates)),
        };
        debug!(
            name,
            age = ?result.age,
            gender = ?result.gender,
            nationality = ?result.nationality,
            "enrichment complete"
        );
        result
    }

    async fn bounded<T, F>(&self, source: &'static str, lookup: F) -> Option<T>
    where
        F: Future<Output = Result<T, DemographicSourceError>>,
    {
        let outcome = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(outcome) => outcome,
            Err(_) => Err(DemographicSourceError::timeout(format!(
                "no answer within {}ms",
                self.lookup_timeout.as_millis()
            ))),
        };
        match outcome {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(source, %error, "demographic lookup failed; leaving attribute unknown");
                None
            }
        }
    }
}

/// Pick the country with the highest probability.
///
/// Ties keep the earliest candidate. Candidates with a blank country code or a
/// non-finite probability are skipped; an empty list yields `None`.
///
/// # Examples
/// ```
/// use backend::domain::most_likely_country;
/// use backend::domain::ports::CountryProbability;
///
/// let candidates = [
///     CountryProbability::new("A", 0.3),
///     CountryProbability::new("B", 0.5),
///     CountryProbability::new("C", 0.5),
/// ];
/// assert_eq!(most_likely_country(&candidates).as_deref(), Some("B"));
/// ```
pub fn most_likely_country(candidates: &[CountryProbability]) -> Option<String> {
    candidates
        .iter()
        .filter(|candidate| {
            candidate.probability.is_finite() && !candidate.country_id.trim().is_empty()
        })
        .fold(None::<&CountryProbability>, |best, candidate| match best {
            Some(current) if candidate.probability <= current.probability => Some(current),
            _ => Some(candidate),
        })
        .map(|winner| winner.country_id.clone())
}
