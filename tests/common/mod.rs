// Shared helpers for building scratch git repositories
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, Signature, Time};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway repository whose commits get strictly increasing timestamps
pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    time: i64,
}

impl TestRepo {
    /// Initialise an empty repository with HEAD pointing at an unborn "main"
    pub fn init() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(dir.path()).expect("Could not init git repo");
        repo.set_head("refs/heads/main")
            .expect("Could not point HEAD at main");

        TestRepo {
            dir,
            repo,
            time: 1_700_000_000,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&mut self) -> Signature<'static> {
        self.time += 60;
        Signature::new("Test User", "test@example.com", &Time::new(self.time, 0))
            .expect("Could not create signature")
    }

    /// Commit on top of HEAD and advance the current branch
    pub fn commit(&mut self, message: &str) -> Oid {
        let parents: Vec<Oid> = self
            .repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .into_iter()
            .collect();
        self.commit_with_parents(Some("HEAD"), message, &parents)
    }

    /// Create a commit with explicit parents, optionally updating a reference
    pub fn commit_with_parents(
        &mut self,
        update_ref: Option<&str>,
        message: &str,
        parents: &[Oid],
    ) -> Oid {
        let sig = self.signature();
        let tree_id = self
            .repo
            .index()
            .expect("Could not get index")
            .write_tree()
            .expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");
        let parents: Vec<Commit> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    /// Create `count` commits on HEAD, returning them oldest first
    pub fn commits(&mut self, count: usize) -> Vec<Oid> {
        (0..count)
            .map(|i| self.commit(&format!("commit {}", i + 1)))
            .collect()
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    pub fn annotated_tag(&mut self, name: &str, oid: Oid) {
        let sig = self.signature();
        let object = self.repo.find_object(oid, None).expect("Could not find object");
        self.repo
            .tag(name, &object, &sig, &format!("Release {}", name), false)
            .expect("Could not create annotated tag");
    }

    pub fn detach(&self, oid: Oid) {
        self.repo.set_head_detached(oid).expect("Could not detach HEAD");
    }

    /// Write a file next to (not inside) the repository working tree
    pub fn write_template(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(".verinfo").join(name);
        fs::create_dir_all(path.parent().expect("template has a parent"))
            .expect("Could not create template dir");
        fs::write(&path, content).expect("Could not write template");
        path
    }
}
