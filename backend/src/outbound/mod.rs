//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **demographics**: reqwest clients for the age, gender, and nationality
//!   estimation services
//! - **cache**: Redis-backed and in-memory person stats caches
//! - **persistence**: PostgreSQL-backed person repository using Diesel ORM
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod demographics;
pub mod persistence;
