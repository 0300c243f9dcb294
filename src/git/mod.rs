//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the few Git operations
//! a release needs, allowing for a real repository backend and an in-memory
//! fake for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [RepositoryClient] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! The release workflow depends on the [RepositoryClient] trait rather than a
//! concrete implementation, so the repository is passed in by the caller.
//!
//! ```rust
//! # use release_bump::git::{MockRepository, RepositoryClient};
//! # use std::path::Path;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = MockRepository::new("main");
//! repo.stage_file(Path::new("CHANGELOG.md"))?;
//! let commit = repo.commit("Close version 1.2.3 in CHANGELOG.md")?;
//! assert_eq!(repo.active_branch()?, "main");
//! assert_eq!(commit.message, "Close version 1.2.3 in CHANGELOG.md");
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::Path;

/// A commit created by [RepositoryClient::commit]
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
}

impl CommitInfo {
    /// The first seven characters of the hash
    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}

/// Version-control capability used by the release workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map backend
/// errors (like `git2::Error`) to [crate::error::ReleaseBumpError] variants.
/// Nothing is retried or rolled back: a failure here ends the release with
/// every earlier step left in place.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation recording stages and commits
pub trait RepositoryClient {
    /// Name of the branch `HEAD` points at
    ///
    /// # Returns
    /// * `Ok(String)` - Short branch name (e.g., "main")
    /// * `Err` - If `HEAD` is detached or cannot be read
    fn active_branch(&self) -> Result<String>;

    /// Stage a file for the next commit
    ///
    /// # Arguments
    /// * `path` - Path of the file relative to the repository root
    fn stage_file(&self, path: &Path) -> Result<()>;

    /// Commit everything staged, using the identity from the ambient configuration
    ///
    /// # Returns
    /// * `Ok(CommitInfo)` - The new commit
    /// * `Err` - If nothing is staged, no identity is configured, or Git fails
    fn commit(&self, message: &str) -> Result<CommitInfo>;
}
