use crate::domain::{BranchContext, TagPattern, NO_BRANCH};
use crate::error::{Result, VerinfoError};
use crate::git::{Repository, Traversal};
use git2::Oid;
use log::debug;
use std::collections::HashMap;

/// Outcome of a tag resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Name of the nearest matching tag
    pub tag: Option<String>,
    /// Commit the matching tag points at
    pub matched_commit: Option<Oid>,
    /// Commit the walk started from (HEAD's tip unless overridden)
    pub commit: Option<Oid>,
    /// Commits visited before reaching the matched commit
    pub distance: usize,
    /// Branch display name, or "no branch"
    pub branch: String,
}

impl ResolutionResult {
    /// Result for a repository without commits, also used when the repository
    /// cannot be read at all
    pub fn unborn() -> Self {
        ResolutionResult {
            tag: None,
            matched_commit: None,
            commit: None,
            distance: 0,
            branch: NO_BRANCH.to_string(),
        }
    }
}

/// Finds the nearest ancestor tag accepted by a [TagPattern]
pub struct TagResolver {
    pattern: TagPattern,
    traversal: Traversal,
}

impl TagResolver {
    /// Create a resolver walking full ancestry
    pub fn new(pattern: TagPattern) -> Self {
        TagResolver {
            pattern,
            traversal: Traversal::default(),
        }
    }

    /// Choose how ancestry is walked
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }

    /// Resolve from `start`, or from HEAD's tip when `start` is `None`
    ///
    /// When several matching tags point at the matched commit, the first one in
    /// the repository's tag enumeration order wins.
    ///
    /// # Returns
    /// * `Ok(ResolutionResult)` - With `tag: None` and the full walk length as
    ///   distance when nothing matches
    /// * `Err(VerinfoError::Argument)` - If `start` is not a commit in the repository
    /// * `Err(VerinfoError::RepositoryUnavailable)` - If the repository cannot be read
    pub fn resolve<R: Repository>(&self, repo: &R, start: Option<Oid>) -> Result<ResolutionResult> {
        let head = repo.head()?;
        let branch = BranchContext::from_head(&head).display_name().to_string();

        let tip = match start {
            Some(oid) => {
                if !repo.has_commit(oid)? {
                    return Err(VerinfoError::argument(format!(
                        "Start commit {} does not exist in the repository",
                        oid
                    )));
                }
                oid
            }
            None => match head.tip() {
                Some(oid) => oid,
                None => {
                    debug!("HEAD is unborn, nothing to resolve");
                    return Ok(ResolutionResult::unborn());
                }
            },
        };

        let mut matching: HashMap<Oid, String> = HashMap::new();
        for tag in repo.tags()? {
            if self.pattern.matches(&tag.name) {
                matching.entry(tag.target).or_insert(tag.name);
            }
        }
        debug!(
            "{} tag(s) match pattern '{}'",
            matching.len(),
            self.pattern.format()
        );

        let mut distance = 0;
        for oid in repo.ancestry(tip, self.traversal)? {
            let oid = oid?;
            if let Some(name) = matching.remove(&oid) {
                debug!("Found tag '{}' at {} after {} commit(s)", name, oid, distance);
                return Ok(ResolutionResult {
                    tag: Some(name),
                    matched_commit: Some(oid),
                    commit: Some(tip),
                    distance,
                    branch,
                });
            }
            distance += 1;
        }

        debug!("No matching tag found after walking {} commit(s)", distance);
        Ok(ResolutionResult {
            tag: None,
            matched_commit: None,
            commit: Some(tip),
            distance,
            branch,
        })
    }
}
