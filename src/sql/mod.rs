//! SQL text builders: identifiers from a fixed allow-list, values as parameters.

mod builder;
pub use builder::*;
