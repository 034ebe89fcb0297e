pub mod model;

use crate::AppState;
use crate::domain::{Article, Comment, ValidationError};
use crate::error::ApiError;
use crate::features::{comments, created};
use crate::pagination::{PageRequest, PageResult, ResourceLinks, empty_as_none, paginate};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

pub const RESOURCE: &str = "artigos";

#[derive(Deserialize)]
struct DeleteArticleQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    id: Option<i64>,
}

pub fn articles_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_articles_handler)
                .post(create_article_handler)
                .put(update_article_handler)
                .delete(delete_article_by_id_handler),
        )
        .route(
            "/{permalink}",
            get(get_article_handler).delete(delete_article_handler),
        )
        .route(
            "/{permalink}/comentarios",
            get(list_article_comments_handler),
        )
}

async fn list_articles_handler(
    State(state): State<AppState>,
    Query(request): Query<PageRequest>,
) -> Result<Json<PageResult<Article>>, ApiError> {
    let articles = state.repo.get_all_articles().await?;
    let links = ResourceLinks::collection(&state.config.public_url, RESOURCE);
    let page = paginate(articles, request, &links);

    debug!(
        page = page.current_page,
        total_pages = page.total_pages,
        "listing articles"
    );
    Ok(Json(page))
}

async fn get_article_handler(
    State(state): State<AppState>,
    Path(permalink): Path<String>,
) -> Result<Json<Article>, ApiError> {
    match state.repo.get_article_by_permalink(&permalink).await? {
        Some(article) => Ok(Json(article)),
        None => Err(ApiError::not_found("Artigo")),
    }
}

// comments of one article, with page links nested under the article
async fn list_article_comments_handler(
    State(state): State<AppState>,
    Path(permalink): Path<String>,
    Query(request): Query<PageRequest>,
) -> Result<Json<PageResult<Comment>>, ApiError> {
    let comments = state.repo.get_comments_by_permalink(&permalink).await?;
    let links = ResourceLinks::scoped(
        &state.config.public_url,
        RESOURCE,
        &permalink,
        comments::RESOURCE,
    );
    let page = paginate(comments, request, &links);

    debug!(
        permalink = %permalink,
        page = page.current_page,
        total_pages = page.total_pages,
        "listing article comments"
    );
    Ok(Json(page))
}

async fn create_article_handler(
    State(state): State<AppState>,
    Json(mut article): Json<Article>,
) -> Result<impl IntoResponse, ApiError> {
    article.validate()?;
    if !state.repo.authors_exist(&article.author_ids()).await? {
        return Err(ValidationError("A lista de autores contém um autor não cadastrado!").into());
    }

    article.generate_permalink();
    state.repo.create_article(&article).await?;

    let permalink = article.permalink.unwrap_or_default();
    Ok(created(format!("/{}/{}", RESOURCE, permalink)))
}

async fn update_article_handler(
    State(state): State<AppState>,
    Json(mut article): Json<Article>,
) -> Result<&'static str, ApiError> {
    let Some(id) = article.id else {
        return Err(ApiError::BadRequest("ID nulo!"));
    };

    let stored = state
        .repo
        .get_article_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Artigo"))?;
    article.merge(stored);

    // an empty author list keeps the current authors
    if !article.authors.is_empty() {
        if article.authors.iter().any(|a| a.id.is_none()) {
            return Err(ValidationError("Os autores devem ter ID!").into());
        }
        if !state.repo.authors_exist(&article.author_ids()).await? {
            return Err(
                ValidationError("A lista de autores contém um autor não cadastrado!").into(),
            );
        }
    }

    article.generate_permalink();
    if !state.repo.update_article(&article).await? {
        return Err(ApiError::not_found("Artigo"));
    }
    Ok("Artigo atualizado")
}

async fn delete_article_handler(
    State(state): State<AppState>,
    Path(permalink): Path<String>,
) -> Result<&'static str, ApiError> {
    if !state.repo.delete_article_by_permalink(&permalink).await? {
        return Err(ApiError::not_found("Artigo"));
    }
    Ok("Artigo deletado com sucesso!")
}

async fn delete_article_by_id_handler(
    State(state): State<AppState>,
    Query(query): Query<DeleteArticleQuery>,
) -> Result<&'static str, ApiError> {
    let Some(id) = query.id else {
        return Err(ApiError::BadRequest(
            "Requisição sem os parametros necessários!",
        ));
    };

    if !state.repo.delete_article_by_id(id).await? {
        return Err(ApiError::not_found("Artigo"));
    }
    Ok("Artigo deletado com sucesso!")
}
