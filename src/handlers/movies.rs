use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::models::movie::{MovieInput, MovieUpdateInput};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::AppJson;
use crate::utils::response::{created, empty_success, success};

pub async fn list_movies(State(state): State<AppState>) -> Result<Response, AppError> {
    let movies = state.movies.list_active().await?;
    Ok(success(movies, "Movies data fetched successfully"))
}

#[derive(Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Search query is required".to_string()))?;

    let movies = state.movies.search_active(query).await?;
    Ok(success(movies, "Search results fetched successfully"))
}

pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let movie = state
        .movies
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    Ok(success(movie, "Movie data fetched successfully"))
}

pub async fn add_movie(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    AppJson(input): AppJson<MovieInput>,
) -> Result<Response, AppError> {
    let movie = input.into_movie();
    state.movies.insert(&movie).await?;
    tracing::info!(movie_id = %movie.id, title = %movie.title, "Movie added");

    Ok(created(movie, "Movie added successfully"))
}

pub async fn update_movie(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    AppJson(input): AppJson<MovieUpdateInput>,
) -> Result<Response, AppError> {
    let mut movie = state
        .movies
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Movie not found".to_string()))?;

    input.apply_to(&mut movie);
    state.movies.update(&movie).await?;

    Ok(success(movie, "Movie updated successfully"))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if !state.movies.soft_delete(id).await? {
        return Err(AppError::NotFound("Movie not found".to_string()));
    }

    Ok(empty_success("Movie deleted successfully"))
}
