//! Request extractors that reject with the API's JSON error envelope.

mod json;
mod movie_id;

pub use json::AppJson;
pub use movie_id::MovieId;
