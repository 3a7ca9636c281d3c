//! SQL text for the movies table. Identifiers come from `SortColumn` only; values are always parameters.

use crate::model::{SortColumn, SortOrder};

pub const MOVIES_TABLE: &str = "movies";

/// Column list shared by every query that returns a full movie.
pub const MOVIE_COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub fn insert_movie() -> String {
    format!(
        "INSERT INTO {} (title, year, runtime, genres) VALUES ($1, $2, $3, $4) RETURNING id, created_at, version",
        MOVIES_TABLE
    )
}

pub fn select_movie_by_id() -> String {
    format!("SELECT {} FROM {} WHERE id = $1", MOVIE_COLUMNS, MOVIES_TABLE)
}

/// Conditional write: only the row still at the submitted version is touched.
pub fn update_movie() -> String {
    format!(
        "UPDATE {} SET title = $1, year = $2, runtime = $3, genres = $4, version = version + 1 \
         WHERE id = $5 AND version = $6 RETURNING version",
        MOVIES_TABLE
    )
}

pub fn delete_movie() -> String {
    format!("DELETE FROM {} WHERE id = $1", MOVIES_TABLE)
}

/// One page of movies plus the filtered total (`total_records`) via a window count.
/// Params: $1 title (empty matches all), $2 genres (empty matches all), $3 limit, $4 offset.
pub fn select_movies_page(sort: SortColumn, order: SortOrder) -> String {
    format!(
        "SELECT count(*) OVER() AS total_records, {cols} FROM {table} \
         WHERE (to_tsvector('simple', unaccent(title)) @@ plainto_tsquery('simple', unaccent($1)) OR $1 = '') \
         AND (genres @> $2 OR $2 = '{{}}') \
         ORDER BY {sort} {order}, id ASC \
         LIMIT $3 OFFSET $4",
        cols = MOVIE_COLUMNS,
        table = MOVIES_TABLE,
        sort = quoted(sort.as_str()),
        order = order.as_sql(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_query_orders_by_column_then_id() {
        let sql = select_movies_page(SortColumn::Year, SortOrder::Desc);
        assert!(sql.contains(r#"ORDER BY "year" DESC, id ASC"#));
        assert!(sql.contains("count(*) OVER() AS total_records"));
        assert!(sql.contains("genres @> $2 OR $2 = '{}'"));
        assert!(sql.ends_with("LIMIT $3 OFFSET $4"));
    }

    #[test]
    fn update_is_conditional_on_version() {
        let sql = update_movie();
        assert!(sql.contains("WHERE id = $5 AND version = $6"));
        assert!(sql.contains("version = version + 1"));
        assert!(sql.ends_with("RETURNING version"));
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quoted("ti\"tle"), "\"ti\"\"tle\"");
    }
}
