//! Domain primitives, use-cases, and ports.
//!
//! Purpose: define the person aggregate, demographic enrichment, and the
//! service orchestrating cache-aside creation. Nothing here depends on HTTP,
//! Redis, or PostgreSQL; adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Person, PersonDraft, PersonChanges, PersonFilter, PersonId: the aggregate
//!   and its inputs.
//! - PersonStats: cacheable demographic projection.
//! - EnrichmentOrchestrator, EnrichmentResult: concurrent multi-source lookup.
//! - PersonService: implementation of the persons driving ports.
//! - TraceId: request correlation identifier.

pub mod enrichment;
pub mod error;
pub mod person;
pub mod person_service;
pub mod person_stats;
pub mod ports;
pub mod trace_id;

pub use self::enrichment::{
    DemographicSources, EnrichmentOrchestrator, EnrichmentResult, most_likely_country,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::person::{
    Person, PersonChanges, PersonDraft, PersonFilter, PersonId, PersonRecord,
    PersonValidationError,
};
pub use self::person_service::{DEFAULT_CACHE_TTL, PersonService};
pub use self::person_stats::{PersonStats, PersonStatsValidationError};
pub use self::trace_id::TraceId;
