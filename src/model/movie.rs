//! Movie entity, its runtime wire encoding, and field rules.

use crate::validator::{has_duplicate, Validator};
use chrono::{DateTime, Datelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_YEAR: i32 = 1888;
pub const MAX_GENRES: usize = 5;
pub const MAX_TITLE_BYTES: usize = 500;

/// Running time in minutes. Serialized as `"<N> mins"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct Runtime(pub i32);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid runtime format")]
pub struct InvalidRuntimeFormat;

impl Runtime {
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mins", self.0)
    }
}

impl FromStr for Runtime {
    type Err = InvalidRuntimeFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (minutes, unit) = s.split_once(' ').ok_or(InvalidRuntimeFormat)?;
        if unit != "mins" {
            return Err(InvalidRuntimeFormat);
        }
        minutes.parse().map(Runtime).map_err(|_| InvalidRuntimeFormat)
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accepts either a bare number of minutes or the `"<N> mins"` string.
impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Minutes(i32),
            Text(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Minutes(n) => Ok(Runtime(n)),
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub year: i32,
    #[serde(skip_serializing_if = "Runtime::is_zero")]
    pub runtime: Runtime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    pub version: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

/// Body of `POST /v1/movies`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub runtime: Runtime,
    pub genres: Option<Vec<String>>,
}

impl CreateMovie {
    /// Builds the movie to insert. A missing `genres` key is recorded first,
    /// so the entity rules below refine it to the length message.
    pub fn into_movie(self, v: &mut Validator) -> Movie {
        let genres_missing = self.genres.is_none();
        let movie = Movie {
            title: self.title,
            year: self.year,
            runtime: self.runtime,
            genres: self.genres.unwrap_or_default(),
            ..Movie::default()
        };
        v.check(genres_missing, "genres", "must be provided");
        validate_movie(v, &movie);
        movie
    }
}

/// Body of `PATCH|PUT /v1/movies/{id}`. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

impl UpdateMovie {
    pub fn apply_to(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(runtime) = self.runtime {
            movie.runtime = runtime;
        }
        if let Some(genres) = self.genres {
            movie.genres = genres;
        }
    }
}

pub fn validate_movie(v: &mut Validator, movie: &Movie) {
    validate_movie_in_year(v, movie, Utc::now().year());
}

/// Every rule runs; per field the later check overrides the earlier one,
/// so the most specific range or shape message is the one reported.
pub fn validate_movie_in_year(v: &mut Validator, movie: &Movie, current_year: i32) {
    v.check(movie.title.is_empty(), "title", "must be provided");
    v.check(
        movie.title.len() > MAX_TITLE_BYTES,
        "title",
        "must not be more than 500 bytes long",
    );

    v.check(movie.year == 0, "year", "must be provided");
    v.check(movie.year <= MIN_YEAR, "year", "must be greater than 1888");
    v.check(movie.year > current_year, "year", "must not be in the future");

    v.check(movie.runtime.0 == 0, "runtime", "must be provided");
    v.check(movie.runtime.0 < 0, "runtime", "must be a positive integer");

    v.check(movie.genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(
        movie.genres.len() > MAX_GENRES,
        "genres",
        "must not contain more than 5 genres",
    );
    v.check(has_duplicate(&movie.genres), "genres", "must not contain duplicate values");
}
