//! Reqwest-backed demographic source adapters.
//!
//! Each adapter issues `GET <endpoint>?name=<name>` and decodes the JSON body.
//! Adapters own transport concerns only: timeouts, status mapping, and
//! decoding. Picking a nationality from the candidates is a domain decision.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{AgeResponseDto, GenderResponseDto, NationalityResponseDto};
use crate::domain::DemographicSources;
use crate::domain::ports::{
    AgeSource, CountryProbability, DemographicSourceError, GenderSource, NationalitySource,
};

const USER_AGENT: &str = "people-backend-enrichment/0.1";

/// Endpoints of the three demographic services.
#[derive(Debug, Clone)]
pub struct DemographicEndpoints {
    pub age: Url,
    pub gender: Url,
    pub nationality: Url,
}

#[derive(Clone)]
struct LookupClient {
    client: Client,
    endpoint: Url,
}

impl LookupClient {
    async fn fetch<T>(&self, name: &str) -> Result<T, DemographicSourceError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("name", name)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref()).map_err(|error| {
            DemographicSourceError::decode(format!(
                "{}: {error}; body: {}",
                self.endpoint,
                body_preview(body.as_ref())
            ))
        })
    }
}

/// Age estimates over HTTP (agify-compatible).
#[derive(Clone)]
pub struct HttpAgeSource(LookupClient);

/// Gender estimates over HTTP (genderize-compatible).
#[derive(Clone)]
pub struct HttpGenderSource(LookupClient);

/// Nationality candidates over HTTP (nationalize-compatible).
#[derive(Clone)]
pub struct HttpNationalitySource(LookupClient);

#[async_trait]
impl AgeSource for HttpAgeSource {
    async fn age(&self, name: &str) -> Result<Option<u32>, DemographicSourceError> {
        let dto: AgeResponseDto = self.0.fetch(name).await?;
        Ok(dto.into_age())
    }
}

#[async_trait]
impl GenderSource for HttpGenderSource {
    async fn gender(&self, name: &str) -> Result<Option<String>, DemographicSourceError> {
        let dto: GenderResponseDto = self.0.fetch(name).await?;
        Ok(dto.into_gender())
    }
}

#[async_trait]
impl NationalitySource for HttpNationalitySource {
    async fn nationalities(
        &self,
        name: &str,
    ) -> Result<Vec<CountryProbability>, DemographicSourceError> {
        let dto: NationalityResponseDto = self.0.fetch(name).await?;
        Ok(dto.into_candidates())
    }
}

/// Build the three HTTP sources over one shared reqwest client.
///
/// # Errors
///
/// Returns an error when the reqwest client cannot be constructed.
pub fn http_demographic_sources(
    endpoints: DemographicEndpoints,
    timeout: Duration,
) -> Result<DemographicSources, reqwest::Error> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;
    let lookup = |endpoint: Url| LookupClient {
        client: client.clone(),
        endpoint,
    };
    Ok(DemographicSources {
        age: Arc::new(HttpAgeSource(lookup(endpoints.age))),
        gender: Arc::new(HttpGenderSource(lookup(endpoints.gender))),
        nationality: Arc::new(HttpNationalitySource(lookup(endpoints.nationality))),
    })
}

fn map_transport_error(error: reqwest::Error) -> DemographicSourceError {
    if error.is_timeout() {
        DemographicSourceError::timeout(error.to_string())
    } else {
        DemographicSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> DemographicSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            DemographicSourceError::timeout(message)
        }
        _ => DemographicSourceError::status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
