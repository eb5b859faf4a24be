//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// People enriched with inferred demographics.
    ///
    /// Optional attributes are NULL when unknown.
    people (id) {
        /// Primary key assigned by the `BIGSERIAL` sequence.
        id -> Int8,
        name -> Varchar,
        surname -> Varchar,
        patronymic -> Nullable<Varchar>,
        age -> Nullable<Int4>,
        /// ISO 3166-1 alpha-2 country code.
        nationality -> Nullable<Varchar>,
        gender -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
