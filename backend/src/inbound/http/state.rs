//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FixturePersonsCommand, FixturePersonsQuery, PersonsCommand, PersonsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub persons: Arc<dyn PersonsCommand>,
    pub persons_query: Arc<dyn PersonsQuery>,
}

impl HttpState {
    /// Construct state from the person driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{FixturePersonsCommand, FixturePersonsQuery};
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixturePersonsCommand), Arc::new(FixturePersonsQuery));
    /// let _query = state.persons_query.clone();
    /// ```
    pub fn new(persons: Arc<dyn PersonsCommand>, persons_query: Arc<dyn PersonsQuery>) -> Self {
        Self {
            persons,
            persons_query,
        }
    }
}

impl Default for HttpState {
    /// State backed by fixture ports; no database or network access.
    fn default() -> Self {
        Self::new(Arc::new(FixturePersonsCommand), Arc::new(FixturePersonsQuery))
    }
}
