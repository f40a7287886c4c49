//! Git access abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of read-only
//! repository queries the tag resolver needs, allowing the resolution algorithm to
//! run against a real repository or an in-memory commit graph.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete implementations
//! include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! ```rust
//! # use git_verinfo::git::{Repository, Traversal};
//! # fn example<R: Repository>(repo: &R) -> git_verinfo::Result<()> {
//! if let Some(tip) = repo.head()?.tip() {
//!     let walked = repo.ancestry(tip, Traversal::FullAncestry)?.count();
//!     println!("{} commits reachable from HEAD", walked);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::Tag;
use crate::error::Result;
use git2::Oid;

/// State of HEAD in the checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    /// No commits exist yet
    Unborn,
    /// HEAD points directly at a commit
    Detached { tip: Oid },
    /// HEAD is on a named branch
    Branch { name: String, tip: Oid },
}

impl HeadState {
    /// The commit HEAD resolves to, if any
    pub fn tip(&self) -> Option<Oid> {
        match self {
            HeadState::Unborn => None,
            HeadState::Detached { tip } | HeadState::Branch { tip, .. } => Some(*tip),
        }
    }
}

/// How ancestry is walked from a starting commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Every reachable commit, newest first, children before parents
    #[default]
    FullAncestry,
    /// Only the first parent of each commit
    FirstParent,
}

/// Lazily evaluated ancestry walk
pub type Ancestry<'a> = Box<dyn Iterator<Item = Result<Oid>> + 'a>;

/// Read-only repository queries used for tag resolution
///
/// All methods return [crate::error::Result<T>]. Implementations map storage
/// failures to [crate::error::VerinfoError::RepositoryUnavailable].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): In-memory commit graph
pub trait Repository {
    /// Get the state of HEAD
    ///
    /// # Returns
    /// * `Ok(HeadState::Unborn)` - The repository has no commits yet
    /// * `Ok(HeadState::Detached { .. })` - HEAD points directly at a commit
    /// * `Ok(HeadState::Branch { .. })` - HEAD is on a branch, with its shorthand name
    fn head(&self) -> Result<HeadState>;

    /// Get all tags together with the commit they point at
    ///
    /// Annotated tags are peeled to their commit; tags that do not lead to a
    /// commit are skipped. The order of the returned list is the tie-break order
    /// when several tags share a commit.
    fn tags(&self) -> Result<Vec<Tag>>;

    /// Walk ancestry starting at (and including) `start`
    ///
    /// Commits are yielded newest first with children before their parents. The
    /// walk is lazy, so callers may stop early.
    fn ancestry(&self, start: Oid, traversal: Traversal) -> Result<Ancestry<'_>>;

    /// Check whether `oid` names a commit in this repository
    fn has_commit(&self, oid: Oid) -> Result<bool>;
}
