use crate::error::{ReleaseBumpError, Result};
use crate::git::{CommitInfo, RepositoryClient};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A commit recorded by [MockRepository]
#[derive(Debug, Clone, PartialEq)]
pub struct MockCommit {
    pub message: String,
    pub files: Vec<PathBuf>,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: Option<String>,
    fail_on_commit: Option<usize>,
    staged: RefCell<Vec<PathBuf>>,
    commits: RefCell<Vec<MockCommit>>,
}

impl MockRepository {
    /// Create a new empty mock repository on `branch`
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            branch: Some(branch.into()),
            fail_on_commit: None,
            staged: RefCell::new(Vec::new()),
            commits: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock repository whose HEAD is detached
    pub fn detached() -> Self {
        MockRepository {
            branch: None,
            ..Self::new("")
        }
    }

    /// Make the `n`-th commit (1-based) fail
    pub fn fail_on_commit(mut self, n: usize) -> Self {
        self.fail_on_commit = Some(n);
        self
    }

    /// Commits made so far, oldest first
    pub fn commits(&self) -> Vec<MockCommit> {
        self.commits.borrow().clone()
    }

    /// Files staged but not yet committed
    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("main")
    }
}

impl RepositoryClient for MockRepository {
    fn active_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ReleaseBumpError::repository("HEAD is detached; no active branch"))
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        let mut staged = self.staged.borrow_mut();
        if !staged.iter().any(|p| p == path) {
            staged.push(path.to_path_buf());
        }
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        if self.staged.borrow().is_empty() {
            return Err(ReleaseBumpError::repository(format!(
                "Nothing to commit for '{}'",
                message
            )));
        }

        let number = self.commits.borrow().len() + 1;
        if self.fail_on_commit == Some(number) {
            return Err(ReleaseBumpError::repository(format!(
                "Injected failure on commit {}",
                number
            )));
        }

        let files = self.staged.borrow_mut().drain(..).collect();
        self.commits.borrow_mut().push(MockCommit {
            message: message.to_string(),
            files,
        });

        Ok(CommitInfo {
            hash: format!("{:040x}", number),
            message: message.to_string(),
        })
    }
}
