use crate::domain::Tag;
use crate::error::{Result, VerinfoError};
use crate::git::{Ancestry, HeadState, Repository, Traversal};
use git2::Oid;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone)]
struct MockCommit {
    parents: Vec<Oid>,
    /// Insertion sequence, standing in for the commit time
    time: usize,
}

/// In-memory commit graph for testing without a git repository
///
/// Commits are timestamped in the order they are added, so parents must be added
/// before their children. Tags keep their insertion order.
pub struct MockRepository {
    commits: HashMap<Oid, MockCommit>,
    tags: Vec<Tag>,
    head: HeadState,
    unavailable: Option<String>,
}

impl MockRepository {
    /// Create a new empty mock repository with an unborn HEAD
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            head: HeadState::Unborn,
            unavailable: None,
        }
    }

    /// Add a commit with the given parents
    pub fn add_commit(&mut self, oid: Oid, parents: &[Oid]) {
        let time = self.commits.len();
        self.commits.insert(
            oid,
            MockCommit {
                parents: parents.to_vec(),
                time,
            },
        );
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(Tag::new(name, oid));
    }

    /// Put HEAD on a branch whose tip is `oid`
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.head = HeadState::Branch {
            name: branch.into(),
            tip: oid,
        };
    }

    /// Detach HEAD at `oid`
    pub fn detach_head(&mut self, oid: Oid) {
        self.head = HeadState::Detached { tip: oid };
    }

    /// Make every query fail as if the repository store were corrupt
    pub fn set_unavailable(&mut self, reason: impl Into<String>) {
        self.unavailable = Some(reason.into());
    }

    fn check_available(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(VerinfoError::repository(reason.clone())),
            None => Ok(()),
        }
    }

    fn commit(&self, oid: Oid) -> Result<&MockCommit> {
        self.commits
            .get(&oid)
            .ok_or_else(|| VerinfoError::repository(format!("Commit not found: {}", oid)))
    }

    fn first_parent_walk(&self, start: Oid) -> Result<Vec<Oid>> {
        let mut walk = Vec::new();
        let mut current = Some(start);
        while let Some(oid) = current {
            walk.push(oid);
            current = self.commit(oid)?.parents.first().copied();
        }
        Ok(walk)
    }

    // Kahn's algorithm over the reachable subgraph: a commit becomes ready once
    // all of its reachable children are emitted, the newest ready commit goes first.
    fn full_walk(&self, start: Oid) -> Result<Vec<Oid>> {
        let mut reachable = HashSet::new();
        let mut stack = vec![start];
        while let Some(oid) = stack.pop() {
            if reachable.insert(oid) {
                stack.extend(self.commit(oid)?.parents.iter().copied());
            }
        }

        let mut pending_children: HashMap<Oid, usize> = HashMap::new();
        for oid in &reachable {
            for parent in &self.commit(*oid)?.parents {
                *pending_children.entry(*parent).or_insert(0) += 1;
            }
        }

        let mut ready = BinaryHeap::new();
        ready.push((self.commit(start)?.time, start));

        let mut walk = Vec::with_capacity(reachable.len());
        while let Some((_, oid)) = ready.pop() {
            walk.push(oid);
            for parent in &self.commit(oid)?.parents {
                if let Some(count) = pending_children.get_mut(parent) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push((self.commit(*parent)?.time, *parent));
                    }
                }
            }
        }

        Ok(walk)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<HeadState> {
        self.check_available()?;
        Ok(self.head.clone())
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        self.check_available()?;
        Ok(self.tags.clone())
    }

    fn ancestry(&self, start: Oid, traversal: Traversal) -> Result<Ancestry<'_>> {
        self.check_available()?;
        let walk = match traversal {
            Traversal::FullAncestry => self.full_walk(start)?,
            Traversal::FirstParent => self.first_parent_walk(start)?,
        };
        Ok(Box::new(walk.into_iter().map(Ok)))
    }

    fn has_commit(&self, oid: Oid) -> Result<bool> {
        self.check_available()?;
        Ok(self.commits.contains_key(&oid))
    }
}
