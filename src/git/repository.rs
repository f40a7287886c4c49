use crate::domain::Tag;
use crate::error::{Result, VerinfoError};
use crate::git::{Ancestry, HeadState, Traversal};
use git2::{ErrorCode, Oid, Repository as Git2Repo, Sort};
use log::debug;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            VerinfoError::repository(format!(
                "Cannot open repository at '{}': {}",
                path.display(),
                e.message()
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Resolve a revision expression (hash, tag, branch, `HEAD~2`, ...) to a commit
    pub fn resolve_revision(&self, revision: &str) -> Result<Oid> {
        self.repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|e| {
                VerinfoError::argument(format!(
                    "Cannot resolve revision '{}': {}",
                    revision,
                    e.message()
                ))
            })
    }
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<HeadState> {
        let reference = match self.repo.head() {
            Ok(reference) => reference,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(HeadState::Unborn);
            }
            Err(e) => return Err(e.into()),
        };

        let tip = reference.peel_to_commit()?.id();

        if self.repo.head_detached()? {
            return Ok(HeadState::Detached { tip });
        }

        let name = reference.shorthand().unwrap_or("HEAD").to_string();
        Ok(HeadState::Branch { name, tip })
    }

    fn tags(&self) -> Result<Vec<Tag>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::with_capacity(names.len());

        for name in names.iter().flatten() {
            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit());

            match target {
                Ok(commit) => tags.push(Tag::new(name, commit.id())),
                Err(e) => debug!("Skipping tag '{}': {}", name, e.message()),
            }
        }

        Ok(tags)
    }

    fn ancestry(&self, start: Oid, traversal: Traversal) -> Result<Ancestry<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start)?;

        if traversal == Traversal::FirstParent {
            revwalk.simplify_first_parent()?;
        }

        Ok(Box::new(revwalk.map(|oid| oid.map_err(VerinfoError::from))))
    }

    fn has_commit(&self, oid: Oid) -> Result<bool> {
        match self.repo.find_commit(oid) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
