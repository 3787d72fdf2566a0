//! Book endpoints.

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
use erudio_domain::Book;
use erudio_hateoas::Representation;
use erudio_service::{BookVO, Mapping};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Books are always listed by title.
pub const SORT_PROPERTY: &str = "title";

/// Creates the book router for representation `R`.
pub fn router<R>() -> Router<AppState>
where
    Book: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(find_all::<R>).post(create::<R>).put(update::<R>))
        .route("/:id", get(find_by_id::<R>).delete(delete_book))
}

/// List books.
#[utoipa::path(
    get,
    path = "/api/book/v1",
    tag = "book",
    params(PaginationQuery),
    responses(
        (status = 200, description = "A page of books sorted by title"),
        (status = 400, description = "Invalid page request", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_all<R>(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    pagination: PaginationQuery,
) -> ApiResult
where
    Book: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    let request = pagination.to_page_request(SORT_PROPERTY, &state.pagination)?;
    let model = state.book_service.find_all::<R>(&request).await?;
    render_page(media, &model)
}

/// Get a book by ID.
#[utoipa::path(
    get,
    path = "/api/book/v1/{id}",
    tag = "book",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "The book", body = BookVO),
        (status = 404, description = "No such book", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn find_by_id<R>(
    State(state): State<AppState>,
    AcceptMedia(media): AcceptMedia,
    Path(id): Path<i64>,
) -> ApiResult
where
    Book: Mapping<R>,
    R: Representation + Serialize + Send + Sync,
{
    let book = state.book_service.find_by_id::<R>(id).await?;
    render_item(media, StatusCode::OK, &book)
}

/// Create a book.
#[utoipa::path(
    post,
    path = "/api/book/v1",
    tag = "book",
    request_body(
        content(
            (BookVO = "application/json"),
            (BookVO = "application/xml"),
            (BookVO = "application/x-yaml")
        )
    ),
    responses(
        (status = 200, description = "The created book", body = BookVO),
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
    Book: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync,
{
    debug!(user = user.username(), "Create book request");
    let book = state.book_service.create(body).await?;
    render_item(media, StatusCode::OK, &book)
}

/// Replace a book; the body must carry its ID.
#[utoipa::path(
    put,
    path = "/api/book/v1",
    tag = "book",
    request_body(
        content(
            (BookVO = "application/json"),
            (BookVO = "application/xml"),
            (BookVO = "application/x-yaml")
        )
    ),
    responses(
        (status = 200, description = "The updated book", body = BookVO),
        (status = 400, description = "Missing or invalid body", body = ErrorResponse),
        (status = 404, description = "No such book", body = ErrorResponse)
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
    Book: Mapping<R>,
    R: Representation + Serialize + DeserializeOwned + Send + Sync,
{
    debug!(user = user.username(), "Update book request");
    let book = state.book_service.update(body).await?;
    render_item(media, StatusCode::OK, &book)
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/api/book/v1/{id}",
    tag = "book",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such book", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    debug!(user = user.username(), id, "Delete book request");
    state.book_service.delete(id).await?;
    Ok(no_content())
}
