//! Body shapes, the default aliens, and the expiring body cache

pub mod cache;
pub mod library;
pub mod shape;

pub use cache::BodyCache;
pub use library::{BodyLibrary, DEFAULT_BODIES};
pub use shape::{validate_body_str, BodyShape};
