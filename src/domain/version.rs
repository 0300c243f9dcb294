use crate::error::{ReleaseBumpError, Result};
use std::fmt;

/// Release version as a `major.minor.patch` triple
///
/// Field order matters: the derived `Ord` compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Check that `target` strictly follows `self`.
    ///
    /// This is the only gate between reading state and mutating it: callers
    /// must run it before touching any file or the repository.
    pub fn ensure_precedes(&self, target: &Version) -> Result<()> {
        if self < target {
            Ok(())
        } else {
            Err(ReleaseBumpError::NotIncreasing {
                current: *self,
                target: *target,
            })
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_version_ordering_is_lexicographic() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 3, 0));
        assert!(Version::new(1, 9, 9) < Version::new(2, 0, 0));
        assert!(Version::new(0, 0, 9) < Version::new(0, 1, 0));
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 99));
    }

    #[test]
    fn test_ensure_precedes_accepts_greater_target() {
        let current = Version::new(1, 2, 3);
        assert!(current.ensure_precedes(&Version::new(1, 2, 4)).is_ok());
        assert!(current.ensure_precedes(&Version::new(1, 3, 0)).is_ok());
        assert!(current.ensure_precedes(&Version::new(2, 0, 0)).is_ok());
    }

    #[test]
    fn test_ensure_precedes_rejects_equal_target() {
        let current = Version::new(1, 2, 3);
        let err = current.ensure_precedes(&Version::new(1, 2, 3)).unwrap_err();
        assert!(matches!(err, ReleaseBumpError::NotIncreasing { .. }));
    }

    #[test]
    fn test_ensure_precedes_rejects_lower_target() {
        let current = Version::new(2, 0, 0);
        let err = current.ensure_precedes(&Version::new(1, 9, 9)).unwrap_err();
        match err {
            ReleaseBumpError::NotIncreasing { current, target } => {
                assert_eq!(current, Version::new(2, 0, 0));
                assert_eq!(target, Version::new(1, 9, 9));
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
