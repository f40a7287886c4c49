//! Domain logic - pure rules independent of git access

pub mod branch;
pub mod tag;
pub mod version;

pub use branch::{BranchContext, NO_BRANCH};
pub use tag::{Tag, TagPattern, DEFAULT_TAG_FORMAT};
pub use version::VersionNumber;
