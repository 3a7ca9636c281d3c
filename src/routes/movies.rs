//! Movie CRUD routes.

use crate::handlers::{
    create_movie, delete_movie, list_movies, method_not_allowed, show_movie, update_movie,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(list_movies).post(create_movie).fallback(method_not_allowed),
        )
        .route(
            "/movies/:id",
            get(show_movie)
                .patch(update_movie)
                .put(update_movie)
                .delete(delete_movie)
                .fallback(method_not_allowed),
        )
}
