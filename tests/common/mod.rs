//! Shared helpers for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use green::{app, apply_migrations, AppConfig, AppState, Movie, MovieStore, Runtime};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Configuration with every default applied.
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None).expect("defaults are valid")
}

/// Create the schema in the per-test database.
pub async fn migrate(pool: &PgPool) {
    apply_migrations(pool).await.expect("migrations apply");
}

/// Build the full application router, mirroring `main.rs`.
pub async fn build_test_app(pool: PgPool) -> Router {
    migrate(&pool).await;
    app(AppState::new(test_config(), pool))
}

pub async fn store(pool: PgPool) -> MovieStore {
    migrate(&pool).await;
    MovieStore::new(pool)
}

pub fn movie(title: &str, year: i32, runtime: i32, genres: &[&str]) -> Movie {
    Movie {
        title: title.into(),
        year,
        runtime: Runtime(runtime),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        ..Movie::default()
    }
}

pub async fn seed(store: &MovieStore, movies: Vec<Movie>) -> Vec<Movie> {
    let mut out = Vec::with_capacity(movies.len());
    for mut m in movies {
        store.insert(&mut m).await.expect("insert seed movie");
        out.push(m);
    }
    out
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
