//! Domain types: the movie entity and list parameters.

pub mod filters;
pub mod movie;

pub use filters::{calculate_metadata, validate_filters, Filters, Metadata, SortColumn, SortOrder};
pub use movie::{validate_movie, CreateMovie, Movie, Runtime, UpdateMovie};
