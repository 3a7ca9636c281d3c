pub mod loader;
pub mod types;

pub use loader::VERSION;
pub use types::*;
