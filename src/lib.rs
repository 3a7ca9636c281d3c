//! green: JSON REST API for a movie catalog backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod model;
pub mod query;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod validator;

pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError, ErrorMessage, StoreError};
pub use migration::apply_migrations;
pub use model::{Filters, Metadata, Movie, Runtime};
pub use routes::app;
pub use state::AppState;
pub use store::{ensure_database_exists, MovieStore};
