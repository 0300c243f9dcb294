use crate::error::{ReleaseBumpError, Result};
use crate::git::CommitInfo;
use git2::{Commit, ErrorCode, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository whose root is `path`.
    ///
    /// Parent directories are not searched: managed file paths are resolved
    /// against the repository root, so the working directory must be that root.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path.as_ref()).map_err(|e| {
            ReleaseBumpError::repository(format!(
                "Not a git repository root '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl super::RepositoryClient for Git2Repository {
    fn active_branch(&self) -> Result<String> {
        // Read HEAD without resolving it so an unborn branch still has a name.
        let head = self.repo.find_reference("HEAD")?;

        let target = head.symbolic_target().ok_or_else(|| {
            ReleaseBumpError::repository("HEAD is detached; no active branch")
        })?;

        Ok(target
            .strip_prefix("refs/heads/")
            .unwrap_or(target)
            .to_string())
    }

    fn stage_file(&self, path: &Path) -> Result<()> {
        let mut index = self.repo.index()?;

        index.add_path(path).map_err(|e| {
            ReleaseBumpError::repository(format!("Cannot stage '{}': {}", path.display(), e))
        })?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<CommitInfo> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        let unchanged = match &parent {
            Some(parent) => parent.tree_id() == tree_id,
            None => tree.is_empty(),
        };
        if unchanged {
            return Err(ReleaseBumpError::repository(format!(
                "Nothing to commit for '{}'",
                message
            )));
        }

        let signature = self.repo.signature().map_err(|e| {
            ReleaseBumpError::repository(format!("No commit identity configured: {}", e))
        })?;

        let parents: Vec<&Commit> = parent.iter().collect();
        let oid = self
            .repo
            .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        Ok(CommitInfo {
            hash: oid.to_string(),
            message: message.to_string(),
        })
    }
}
