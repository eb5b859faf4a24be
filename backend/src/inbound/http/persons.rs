//! Person HTTP handlers.
//!
//! ```text
//! POST   /api/v1/persons
//! GET    /api/v1/persons
//! GET    /api/v1/persons/{id}
//! PUT    /api/v1/persons/{id}
//! DELETE /api/v1/persons/{id}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, error::JsonPayloadError, get, post, put, web};
use pagination::{PageParams, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Person, PersonChanges, PersonDraft, PersonFilter};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, malformed_body_error, parse_gender_filter, parse_optional_number, parse_person_id,
    person_validation_error,
};

/// Request payload for creating a person.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    #[schema(example = "Oliver")]
    pub name: String,
    #[schema(example = "Smith")]
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
}

/// Response payload for a created person.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedPersonResponse {
    #[schema(example = 1)]
    pub id: i64,
}

/// Partial update; omitted, empty, or zero fields keep their stored value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    #[schema(example = "GB")]
    pub nationality: Option<String>,
    #[schema(example = "male")]
    pub gender: Option<String>,
}

impl From<UpdatePersonRequest> for PersonChanges {
    fn from(value: UpdatePersonRequest) -> Self {
        Self {
            name: value.name,
            surname: value.surname,
            patronymic: value.patronymic,
            age: value.age,
            nationality: value.nationality,
            gender: value.gender,
        }
    }
}

/// Stored person. Unknown attributes are `null`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Person> for PersonResponse {
    fn from(value: Person) -> Self {
        Self {
            id: value.id().get(),
            name: value.name().to_owned(),
            surname: value.surname().to_owned(),
            patronymic: value.patronymic().map(str::to_owned),
            age: value.age(),
            nationality: value.nationality().map(str::to_owned),
            gender: value.gender().map(str::to_owned),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

/// Query string for listing people. Numbers arrive as text so parse failures
/// produce structured errors.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PersonListQuery {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    /// Exact age in years; `0` matches any age.
    pub age: Option<String>,
    pub nationality: Option<String>,
    /// `male` or `female`.
    pub gender: Option<String>,
    /// Maximum number of people; `0` or absent returns all.
    pub limit: Option<String>,
    /// Number of people to skip.
    pub offset: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

fn parse_list_query(query: PersonListQuery) -> Result<(PersonFilter, PageRequest), crate::domain::Error> {
    let PersonListQuery {
        name,
        surname,
        patronymic,
        age,
        nationality,
        gender,
        limit,
        offset,
    } = query;

    let filter = PersonFilter {
        name: non_empty(name),
        surname: non_empty(surname),
        patronymic: non_empty(patronymic),
        age: parse_optional_number::<u32>(FieldName::new("age"), age.as_deref())?
            .filter(|age| *age > 0),
        nationality: non_empty(nationality),
        gender: parse_gender_filter(gender)?,
    };
    let page = PageParams {
        offset: parse_optional_number(FieldName::new("offset"), offset.as_deref())?,
        limit: parse_optional_number(FieldName::new("limit"), limit.as_deref())?,
    };
    Ok((filter, PageRequest::from(page)))
}

/// JSON extractor configuration returning domain errors for bad bodies.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| malformed_body_error(err).into())
}

/// Create a person, enriching it with inferred demographics.
#[utoipa::path(
    post,
    path = "/api/v1/persons",
    request_body = CreatePersonRequest,
    responses(
        (status = 201, description = "Person created", body = CreatedPersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "createPerson"
)]
#[post("/persons")]
pub async fn create_person(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePersonRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePersonRequest {
        name,
        surname,
        patronymic,
    } = payload.into_inner();
    let draft = PersonDraft::new(name, surname, patronymic).map_err(person_validation_error)?;
    let person = state.persons.create_person(draft).await?;
    Ok(HttpResponse::Created().json(CreatedPersonResponse {
        id: person.id().get(),
    }))
}

/// List people matching optional equality filters, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/persons",
    params(PersonListQuery),
    responses(
        (status = 200, description = "Matching people", body = [PersonResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "listPersons"
)]
#[get("/persons")]
pub async fn list_persons(
    state: web::Data<HttpState>,
    query: web::Query<PersonListQuery>,
) -> ApiResult<web::Json<Vec<PersonResponse>>> {
    let (filter, page) = parse_list_query(query.into_inner())?;
    let people = state.persons_query.list_persons(filter, page).await?;
    Ok(web::Json(people.into_iter().map(PersonResponse::from).collect()))
}

/// Fetch a person by id.
#[utoipa::path(
    get,
    path = "/api/v1/persons/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 200, description = "Person", body = PersonResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "getPerson"
)]
#[get("/persons/{id}")]
pub async fn get_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = parse_person_id(&path.into_inner())?;
    let person = state.persons_query.get_person(id).await?;
    Ok(web::Json(PersonResponse::from(person)))
}

/// Apply a partial update to a person.
#[utoipa::path(
    put,
    path = "/api/v1/persons/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Updated person", body = PersonResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "updatePerson"
)]
#[put("/persons/{id}")]
pub async fn update_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePersonRequest>,
) -> ApiResult<web::Json<PersonResponse>> {
    let id = parse_person_id(&path.into_inner())?;
    let person = state
        .persons
        .update_person(id, PersonChanges::from(payload.into_inner()))
        .await?;
    Ok(web::Json(PersonResponse::from(person)))
}

/// Delete a person.
#[utoipa::path(
    delete,
    path = "/api/v1/persons/{id}",
    params(("id" = i64, Path, description = "Person identifier")),
    responses(
        (status = 204, description = "Person deleted"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "Person not found", body = ErrorSchema)
    ),
    tags = ["persons"],
    operation_id = "deletePerson"
)]
#[delete("/persons/{id}")]
pub async fn delete_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_person_id(&path.into_inner())?;
    state.persons.delete_person(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "persons_tests.rs"]
mod tests;
