//! Internal Diesel row structs for the `people` table.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::people;

/// Row struct for reading from the people table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: Option<i32>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating person records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = people)]
pub(crate) struct NewPersonRow<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub patronymic: Option<&'a str>,
    pub age: Option<i32>,
    pub nationality: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full overwrite of every mutable column; `None` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = people)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PersonUpdate<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub patronymic: Option<&'a str>,
    pub age: Option<i32>,
    pub nationality: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
