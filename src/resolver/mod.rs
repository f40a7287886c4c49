//! Nearest matching tag and commit distance from HEAD

pub mod tag_resolver;

pub use tag_resolver::{ResolutionResult, TagResolver};
