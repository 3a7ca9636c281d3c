//! Movie persistence against PostgreSQL, plus database bootstrap.

use crate::error::StoreError;
use crate::model::{calculate_metadata, Filters, Metadata, Movie};
use crate::sql;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for a single round trip to the database.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(sqlx::FromRow)]
struct MovieRow {
    total_records: i64,
    #[sqlx(flatten)]
    movie: Movie,
}

/// Data access for the `movies` table. Each operation is one round trip,
/// bounded by `timeout`; nothing is retried.
#[derive(Clone, Debug)]
pub struct MovieStore {
    pool: PgPool,
    timeout: Duration,
}

impl MovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    pub fn with_timeout(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout),
        }
    }

    /// Inserts the movie and writes the generated id, created_at and version back into it.
    pub async fn insert(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let q = sql::insert_movie();
        tracing::debug!(sql = %q, "query");
        let (id, created_at, version): (i64, DateTime<Utc>, i32) = self
            .bounded(
                sqlx::query_as(&q)
                    .bind(&movie.title)
                    .bind(movie.year)
                    .bind(movie.runtime)
                    .bind(&movie.genres)
                    .fetch_one(&self.pool),
            )
            .await?;
        movie.id = id;
        movie.created_at = created_at;
        movie.version = version;
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<Movie, StoreError> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let q = sql::select_movie_by_id();
        tracing::debug!(sql = %q, id, "query");
        self.bounded(sqlx::query_as::<_, Movie>(&q).bind(id).fetch_optional(&self.pool))
            .await?
            .ok_or(StoreError::RecordNotFound)
    }

    /// Writes the movie only if the stored version still equals `movie.version`.
    /// A vanished row and a stale version both yield `EditConflict`.
    pub async fn update(&self, movie: &mut Movie) -> Result<(), StoreError> {
        let q = sql::update_movie();
        tracing::debug!(sql = %q, id = movie.id, version = movie.version, "query");
        let version: Option<i32> = self
            .bounded(
                sqlx::query_scalar(&q)
                    .bind(&movie.title)
                    .bind(movie.year)
                    .bind(movie.runtime)
                    .bind(&movie.genres)
                    .bind(movie.id)
                    .bind(movie.version)
                    .fetch_optional(&self.pool),
            )
            .await?;
        movie.version = version.ok_or(StoreError::EditConflict)?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        if id < 1 {
            return Err(StoreError::RecordNotFound);
        }
        let q = sql::delete_movie();
        tracing::debug!(sql = %q, id, "query");
        let result = self
            .bounded(sqlx::query(&q).bind(id).execute(&self.pool))
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound);
        }
        Ok(())
    }

    /// One page of movies matching `title` (full text, empty matches all) and
    /// containing every genre in `genres` (empty matches all). Metadata counts
    /// the filtered set.
    pub async fn list(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), StoreError> {
        let q = sql::select_movies_page(filters.sort_column(), filters.sort_direction());
        tracing::debug!(sql = %q, title, genres = ?genres, "query");
        let rows: Vec<MovieRow> = self
            .bounded(
                sqlx::query_as(&q)
                    .bind(title)
                    .bind(genres)
                    .bind(filters.limit())
                    .bind(filters.offset())
                    .fetch_all(&self.pool),
            )
            .await?;

        let total_records = rows.first().map(|r| r.total_records).unwrap_or(0);
        let movies = rows.into_iter().map(|r| r.movie).collect();
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        Ok((movies, metadata))
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(&self.pool)).await?;
        Ok(())
    }
}

/// Ensure the database named in `database_url` exists; create it if not. Connects to
/// the `postgres` maintenance database on the same server to run CREATE DATABASE.
/// Call before creating the main pool. A URL that names no database is left alone.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connection options for the maintenance database, plus the database the URL
/// names. `None` when the URL names no database or names `postgres` itself.
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(String::from);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
