//! Demographic source outbound adapters.
//!
//! Thin HTTP implementations of the `AgeSource`, `GenderSource`, and
//! `NationalitySource` ports.

mod dto;
mod http_source;

pub use http_source::{
    DemographicEndpoints, HttpAgeSource, HttpGenderSource, HttpNationalitySource,
    http_demographic_sources,
};
