use crate::git::HeadState;

/// Display name used when HEAD is detached or unborn
pub const NO_BRANCH: &str = "no branch";

/// Represents the branch HEAD is on, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchContext {
    Named(String),
    Detached,
    Unborn,
}

impl BranchContext {
    /// Derive the branch context from the state of HEAD
    pub fn from_head(head: &HeadState) -> Self {
        match head {
            HeadState::Branch { name, .. } => BranchContext::Named(name.clone()),
            HeadState::Detached { .. } => BranchContext::Detached,
            HeadState::Unborn => BranchContext::Unborn,
        }
    }

    /// Name to show in rendered output
    pub fn display_name(&self) -> &str {
        match self {
            BranchContext::Named(name) => name,
            BranchContext::Detached | BranchContext::Unborn => NO_BRANCH,
        }
    }
}
