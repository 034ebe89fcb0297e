pub mod model;

use crate::AppState;
use crate::domain::{Comment, ValidationError};
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

pub const RESOURCE: &str = "comentarios";

pub fn comments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_comments_handler)
                .post(create_comment_handler)
                .put(update_comment_handler),
        )
        .route(
            "/{id}",
            get(get_comment_handler).delete(delete_comment_handler),
        )
}

async fn list_comments_handler(
    State(state): State<AppState>,
    Query(request): Query<PageRequest>,
) -> Result<Json<PageResult<Comment>>, ApiError> {
    let comments = state.repo.get_all_comments().await?;
    let links = ResourceLinks::collection(&state.config.public_url, RESOURCE);
    let page = paginate(comments, request, &links);

    debug!(
        page = page.current_page,
        total_pages = page.total_pages,
        "listing comments"
    );
    Ok(Json(page))
}

async fn get_comment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Comment>, ApiError> {
    match state.repo.get_comment(id).await? {
        Some(comment) => Ok(Json(comment)),
        None => Err(ApiError::not_found("Comentário")),
    }
}

async fn create_comment_handler(
    State(state): State<AppState>,
    Json(comment): Json<Comment>,
) -> Result<impl IntoResponse, ApiError> {
    comment.validate()?;

    // validate() guarantees the article id is there
    let article_id = comment.article_id.unwrap_or_default();
    if state.repo.get_article_by_id(article_id).await?.is_none() {
        return Err(ValidationError("Artigo relacionado não existe!").into());
    }

    let id = state.repo.create_comment(&comment).await?;
    Ok(created(format!("/{}/{}", RESOURCE, id)))
}

async fn update_comment_handler(
    State(state): State<AppState>,
    Json(mut comment): Json<Comment>,
) -> Result<&'static str, ApiError> {
    let Some(id) = comment.id else {
        return Err(ApiError::BadRequest("ID nulo!"));
    };

    let stored = state
        .repo
        .get_comment(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Comentário"))?;
    comment.merge(stored);

    if !state.repo.update_comment(&comment).await? {
        return Err(ApiError::not_found("Comentário"));
    }
    Ok("Comentario atualizado!")
}

async fn delete_comment_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<&'static str, ApiError> {
    if !state.repo.delete_comment(id).await? {
        return Err(ApiError::not_found("Comentário"));
    }
    Ok("Comentario deletado com sucesso!")
}
