//! Driven ports for the three external demographic lookups.
//!
//! Each source answers one question about a given name. Sources report
//! "no answer" as `Ok(None)` (or an empty candidate list) and reserve errors
//! for transport, status, and decoding failures. Callers absorb every error;
//! a failed lookup only leaves its attribute unknown.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by demographic source adapters.
    pub enum DemographicSourceError {
        /// The request could not be sent or the response body not read.
        Transport { message: String } => "demographic source transport failed: {message}",
        /// The source did not answer within its deadline.
        Timeout { message: String } => "demographic source timed out: {message}",
        /// The source answered with a non-success status.
        Status { message: String } => "demographic source rejected the request: {message}",
        /// The response body was not the expected JSON shape.
        Decode { message: String } => "demographic source payload invalid: {message}",
    }
}

/// One ranked nationality candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryProbability {
    /// ISO 3166-1 alpha-2 country code.
    pub country_id: String,
    /// Probability reported by the source.
    pub probability: f64,
}

impl CountryProbability {
    /// Convenience constructor.
    pub fn new(country_id: impl Into<String>, probability: f64) -> Self {
        Self {
            country_id: country_id.into(),
            probability,
        }
    }
}

/// Source estimating age from a given name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgeSource: Send + Sync {
    /// Estimated age, or `None` when the source has no estimate.
    async fn age(&self, name: &str) -> Result<Option<u32>, DemographicSourceError>;
}

/// Source estimating gender from a given name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenderSource: Send + Sync {
    /// Estimated gender, or `None` when the source has no estimate.
    async fn gender(&self, name: &str) -> Result<Option<String>, DemographicSourceError>;
}

/// Source ranking likely nationalities for a given name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NationalitySource: Send + Sync {
    /// Candidates in source order; may be empty.
    async fn nationalities(
        &self,
        name: &str,
    ) -> Result<Vec<CountryProbability>, DemographicSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DemographicSourceError::transport("reset"), "transport failed: reset")]
    #[case(DemographicSourceError::timeout("5000ms"), "timed out: 5000ms")]
    #[case(DemographicSourceError::status("status 429"), "rejected the request: status 429")]
    #[case(DemographicSourceError::decode("eof"), "payload invalid: eof")]
    fn errors_describe_their_kind(#[case] error: DemographicSourceError, #[case] expected: &str) {
        assert!(error.to_string().ends_with(expected), "{error}");
    }
}
