//! Schema bootstrap for the movies table. Every statement is idempotent, so it runs on each start.

use crate::error::StoreError;
use crate::sql::MOVIES_TABLE;
use sqlx::PgPool;

/// Apply DDL in dependency order: extension, table, indexes.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("CREATE EXTENSION IF NOT EXISTS unaccent")
        .execute(pool)
        .await?;

    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id BIGSERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            title TEXT NOT NULL,
            year INTEGER NOT NULL,
            runtime INTEGER NOT NULL,
            genres TEXT[] NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            CONSTRAINT movies_runtime_check CHECK (runtime >= 0),
            CONSTRAINT movies_year_check CHECK (year BETWEEN 1888 AND date_part('year', now())),
            CONSTRAINT genres_length_check CHECK (array_length(genres, 1) BETWEEN 1 AND 5)
        )
        "#,
        table = MOVIES_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;

    let indexes = [
        format!(
            "CREATE INDEX IF NOT EXISTS movies_title_idx ON {} USING GIN (to_tsvector('simple', title))",
            MOVIES_TABLE
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS movies_genres_idx ON {} USING GIN (genres)",
            MOVIES_TABLE
        ),
    ];
    for sql in &indexes {
        sqlx::query(sql).execute(pool).await?;
    }

    tracing::debug!(table = MOVIES_TABLE, "schema up to date");
    Ok(())
}
