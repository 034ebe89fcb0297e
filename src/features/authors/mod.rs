pub mod model;

use crate::AppState;
use crate::domain::Author;
use crate::error::ApiError;
use crate::features::created;
use crate::pagination::{PageRequest, PageResult, ResourceLinks, paginate};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use tracing::debug;

pub const RESOURCE: &str = "autores";

pub fn authors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_authors_handler)
                .post(create_author_handler)
                .put(update_author_handler),
        )
        .route(
            "/{id}",
            get(get_author_handler).delete(delete_author_handler),
        )
}

async fn list_authors_handler(
    State(state): State<AppState>,
    Query(request): Query<PageRequest>,
) -> Result<Json<PageResult<Author>>, ApiError> {
    let authors = state.repo.get_all_authors().await?;
    let links = ResourceLinks::collection(&state.config.public_url, RESOURCE);
    let page = paginate(authors, request, &links);

    debug!(
        page = page.current_page,
        total_pages = page.total_pages,
        "listing authors"
    );
    Ok(Json(page))
}

async fn get_author_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Author>, ApiError> {
    match state.repo.get_author(id).await? {
        Some(author) => Ok(Json(author)),
        None => Err(ApiError::not_found("Autor")),
    }
}

async fn create_author_handler(
    State(state): State<AppState>,
    Json(author): Json<Author>,
) -> Result<impl IntoResponse, ApiError> {
    author.validate()?;
    let id = state.repo.create_author(&author).await?;

    Ok(created(format!("/{}/{}", RESOURCE, id)))
}

async fn update_author_handler(
    State(state): State<AppState>,
    Json(mut author): Json<Author>,
) -> Result<&'static str, ApiError> {
    let Some(id) = author.id else {
        return Err(ApiError::BadRequest("Id para busca está nulo"));
    };

    let stored = state
        .repo
        .get_author(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Autor"))?;
    author.merge(stored);

    if !state.repo.update_author(&author).await? {
        return Err(ApiError::not_found("Autor"));
    }
    Ok("Autor atualizado")
}

async fn delete_author_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if !state.repo.delete_author(id).await? {
        return Err(ApiError::not_found("Autor"));
    }
    Ok("Autor deletado com sucesso")
}
