//! Shared application state for all routes. Cloned per request; holds no mutable data.

use crate::config::AppConfig;
use crate::store::MovieStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub movies: MovieStore,
}

impl AppState {
    pub fn new(config: AppConfig, pool: sqlx::PgPool) -> Self {
        let movies = MovieStore::with_timeout(pool, config.db.query_timeout);
        Self {
            config: Arc::new(config),
            movies,
        }
    }
}
