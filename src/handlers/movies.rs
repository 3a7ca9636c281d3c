//! Movie handlers: create, show, update, delete, list.

use crate::error::AppError;
use crate::extractors::{AppJson, MovieId};
use crate::model::{validate_filters, validate_movie, CreateMovie, Filters, UpdateMovie};
use crate::query::{read_csv, read_int, read_sort, read_string, QueryParams};
use crate::response::{self, MovieList};
use crate::state::AppState;
use crate::validator::Validator;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
};

/// Columns a client may sort the list by.
pub const SORT_SAFELIST: &[&str] = &["id", "title", "year", "runtime"];

/// Optional precondition header for updates.
pub const EXPECTED_VERSION_HEADER: &str = "x-expected-version";

fn failed(v: Validator) -> AppError {
    AppError::FailedValidation(v.into_errors())
}

pub async fn create_movie(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovie>,
) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let mut movie = input.into_movie(&mut v);
    if !v.valid() {
        return Err(failed(v));
    }
    state.movies.insert(&mut movie).await?;
    tracing::info!(id = movie.id, "movie created");
    let location = format!("/v1/movies/{}", movie.id);
    Ok(response::created(&location, movie))
}

pub async fn show_movie(
    State(state): State<AppState>,
    MovieId(id): MovieId,
) -> Result<impl IntoResponse, AppError> {
    let movie = state.movies.get(id).await?;
    Ok(response::ok(movie))
}

pub async fn update_movie(
    State(state): State<AppState>,
    MovieId(id): MovieId,
    headers: HeaderMap,
    AppJson(input): AppJson<UpdateMovie>,
) -> Result<impl IntoResponse, AppError> {
    let mut movie = state.movies.get(id).await?;
    if let Some(expected) = expected_version(&headers)? {
        if expected != movie.version {
            return Err(AppError::EditConflict);
        }
    }

    input.apply_to(&mut movie);
    let mut v = Validator::new();
    validate_movie(&mut v, &movie);
    if !v.valid() {
        return Err(failed(v));
    }

    state.movies.update(&mut movie).await?;
    tracing::info!(id = movie.id, version = movie.version, "movie updated");
    Ok(response::ok(movie))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    MovieId(id): MovieId,
) -> Result<impl IntoResponse, AppError> {
    state.movies.delete(id).await?;
    tracing::info!(id, "movie deleted");
    Ok(response::message("movie successfully deleted"))
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let mut v = Validator::new();
    let title = read_string(&params, "title", "");
    let genres = read_csv(&params, "genres");
    let page = read_int(&params, "page", 1, &mut v);
    let page_size = read_int(&params, "page_size", 20, &mut v);
    let (sort, order) = read_sort(&params, "id");

    let filters = Filters {
        page,
        page_size,
        sort,
        sort_safelist: SORT_SAFELIST.iter().map(|s| s.to_string()).collect(),
        order,
    };
    validate_filters(&mut v, &filters);
    if !v.valid() {
        return Err(failed(v));
    }

    let (movies, metadata) = state.movies.list(&title, &genres, &filters).await?;
    Ok(response::ok(MovieList { metadata, movies }))
}

fn expected_version(headers: &HeaderMap) -> Result<Option<i32>, AppError> {
    let Some(raw) = headers.get(EXPECTED_VERSION_HEADER) else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(format!("{} must be an integer", EXPECTED_VERSION_HEADER)))
}
