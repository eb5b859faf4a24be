//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details name the
//! offending field, the rejected value, and a stable code.

use serde_json::json;

use crate::domain::{Error, PersonId, PersonValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    BlankField,
    InvalidId,
    InvalidNumber,
    InvalidGender,
    MalformedBody,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::InvalidGender => "invalid_gender",
            ErrorCode::MalformedBody => "malformed_body",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Genders accepted by the list filter.
const GENDERS: [&str; 2] = ["male", "female"];

pub(crate) fn parse_person_id(raw: &str) -> Result<PersonId, Error> {
    let field = FieldName::new("id");
    raw.parse::<i64>()
        .ok()
        .and_then(|value| PersonId::new(value).ok())
        .ok_or_else(|| {
            field_error(
                field,
                "id must be a positive integer".to_owned(),
                ErrorCode::InvalidId,
                raw,
            )
        })
}

/// Parse an optional non-negative integer query parameter.
pub(crate) fn parse_optional_number<T>(field: FieldName, raw: Option<&str>) -> Result<Option<T>, Error>
where
    T: std::str::FromStr,
{
    raw.filter(|value| !value.is_empty())
        .map(|value| {
            value.parse::<T>().map_err(|_| {
                field_error(
                    field,
                    format!("{} must be a non-negative integer", field.as_str()),
                    ErrorCode::InvalidNumber,
                    value,
                )
            })
        })
        .transpose()
}

pub(crate) fn parse_gender_filter(raw: Option<String>) -> Result<Option<String>, Error> {
    match raw.filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) if GENDERS.contains(&value.as_str()) => Ok(Some(value)),
        Some(value) => Err(field_error(
            FieldName::new("gender"),
            "gender must be male or female".to_owned(),
            ErrorCode::InvalidGender,
            &value,
        )),
    }
}

pub(crate) fn person_validation_error(error: PersonValidationError) -> Error {
    let message = error.to_string();
    match error {
        PersonValidationError::Blank { field } => {
            Error::invalid_request(message).with_details(json!({
                "field": field,
                "code": ErrorCode::BlankField.as_str(),
            }))
        }
        PersonValidationError::NonPositiveId(value) => field_error(
            FieldName::new("id"),
            message,
            ErrorCode::InvalidId,
            &value.to_string(),
        ),
    }
}

pub(crate) fn malformed_body_error(reason: impl std::fmt::Display) -> Error {
    Error::invalid_request("request body is not valid JSON for this endpoint").with_details(json!({
        "reason": reason.to_string(),
        "code": ErrorCode::MalformedBody.as_str(),
    }))
}
