//! Person endpoints, mounted once per representation version.
//!
//! `/api/person/v1` serves [`PersonVO`](erudio_service::PersonVO) and
//! `/api/person/v2` serves [`PersonVOV2`](erudio_service::PersonVOV2); the
//! handlers are shared and generic over the representation.

use crate::{
    extractors::{AcceptMedia, AuthenticatedUser, NegotiatedBody, PaginationQuery},
    responses::{no_content, render_item, render_page, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use erudio_core::ErrorResponse;
use erudio_domain::Person;
use erudio_hateoas::Representation;
use erudio_service::{Mapping, PersonVO};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// People are always listed by first name.
pub const SORT_PROPERTY: &str = "firstName";

/// Creates the person router for representation `R`.
pub fn router<R>() -> Router<AppState>
where
    Person: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(find_all::<R>).post(create::<R>).put(update::<R>))
        .route("/:id", get(find_by_id::<R>).patch(disable::<R>).delete(delete_person))
        .route("/findPersonByName/:first_name", get(find_by_name::<R>))
}

/// List people.
#[utoipa::path(
    get,
    path = "/api/person/{version}",
    tag = "person",
    params(
        ("version" = String, Path, description = "Representation version: v1 or v2"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "A page of people sorted by first name"),
        (status = 400, description = "Invalid page request", body = ErrorResponse),
        (status = 401, description = "Invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Missing token", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_all<R>(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    pagination: PaginationQuery,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    let request = pagination.to_page_request(SORT_PROPERTY, &state.pagination)?;
    let model = state.person_service.find_all::<R>(&request).await?;
    render_page(media, &model)
}

/// List people whose first name contains a fragment, ignoring case.
#[utoipa::path(
    get,
    path = "/api/person/{version}/findPersonByName/{first_name}",
    tag = "person",
    params(
        ("version" = String, Path, description = "Representation version: v1 or v2"),
        ("first_name" = String, Path, description = "First name fragment"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "A page of matching people"),
        (status = 400, description = "Invalid page request", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_by_name<R>(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    Path(first_name): Path<String>,
    pagination: PaginationQuery,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    let request = pagination.to_page_request(SORT_PROPERTY, &state.pagination)?;
    let model = state.person_service.find_by_name::<R>(&first_name, &request).await?;
    render_page(media, &model)
}

/// Get a person by ID.
#[utoipa::path(
    get,
    path = "/api/person/{version}/{id}",
    tag = "person",
    params(
        ("version" = String, Path, description = "Representation version: v1 or v2"),
        ("id" = i64, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "The person", body = PersonVO),
        (status = 404, description = "No such person", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_by_id<R>(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    Path(id): Path<i64>,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    let person = state.person_service.find_by_id::<R>(id).await?;
    render_item(media, StatusCode::OK, &person)
}

/// Create a person.
#[utoipa::path(
    post,
    path = "/api/person/{version}",
    tag = "person",
    params(("version" = String, Path, description = "Representation version: v1 or v2")),
    request_body(
        content(
            (PersonVO = "application/json"),
            (PersonVO = "application/xml"),
            (PersonVO = "application/x-yaml")
        )
    ),
    responses(
        (status = 200, description = "The created person", body = PersonVO),
        (status = 400, description = "Missing or invalid body", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create<R>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AcceptMedia(media): AcceptMedia,
    NegotiatedBody(body): NegotiatedBody<R>,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync,
{
    debug!(user = user.username(), version = R::VERSION, "Create person request");
    let person = state.person_service.create(body).await?;
    render_item(media, StatusCode::OK, &person)
}

/// Update a person; the body must carry its ID.
#[utoipa::path(
    put,
    path = "/api/person/{version}",
    tag = "person",
    params(("version" = String, Path, description = "Representation version: v1 or v2")),
    request_body(
        content(
            (PersonVO = "application/json"),
            (PersonVO = "application/xml"),
            (PersonVO = "application/x-yaml")
        )
    ),
    responses(
        (status = 200, description = "The updated person", body = PersonVO),
        (status = 400, description = "Missing or invalid body", body = ErrorResponse),
        (status = 404, description = "No such person", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update<R>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AcceptMedia(media): AcceptMedia,
    NegotiatedBody(body): NegotiatedBody<R>,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync,
{
    debug!(user = user.username(), version = R::VERSION, "Update person request");
    let person = state.person_service.update(body).await?;
    render_item(media, StatusCode::OK, &person)
}

/// Disable a person.
#[utoipa::path(
    patch,
    path = "/api/person/{version}/{id}",
    tag = "person",
    params(
        ("version" = String, Path, description = "Representation version: v1 or v2"),
        ("id" = i64, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "The disabled person", body = PersonVO),
        (status = 404, description = "No such person", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn disable<R>(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    AcceptMedia(media): AcceptMedia,
    Path(id): Path<i64>,
) -> ApiResult
where
    Person: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    debug!(user = user.username(), id, "Disable person request");
    let person = state.person_service.disable::<R>(id).await?;
    render_item(media, StatusCode::OK, &person)
}

/// Delete a person.
#[utoipa::path(
    delete,
    path = "/api/person/{version}/{id}",
    tag = "person",
    params(
        ("version" = String, Path, description = "Representation version: v1 or v2"),
        ("id" = i64, Path, description = "Person ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such person", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_person(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    debug!(user = user.username(), id, "Delete person request");
    state.person_service.delete(id).await?;
    Ok(no_content())
}
