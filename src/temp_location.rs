//! Where unsaved logs are spooled
//!
//! The temp directory is passed in rather than looked up at write time, so
//! tests can point loggers at a scratch directory.

use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};

/// Default file name prefix for spooled logs
pub const DEFAULT_PREFIX: &str = "LOG";

/// Directory and name prefix used to create backing files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempLocation {
    dir: PathBuf,
    prefix: String,
}

impl TempLocation {
    /// The platform temp directory with the `LOG` prefix
    pub fn system() -> Self {
        Self::in_dir(std::env::temp_dir())
    }

    /// A caller-chosen directory with the `LOG` prefix
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Create a new, empty, uniquely named file and return its path
    ///
    /// The file is left on disk; removing it is up to the caller.
    pub fn create_file(&self) -> Result<PathBuf> {
        tempfile::Builder::new()
            .prefix(&self.prefix)
            .tempfile_in(&self.dir)
            .map_err(|e| LogError::filesystem("create temp file in", &self.dir, e))?
            .into_temp_path()
            .keep()
            .map_err(|e| LogError::filesystem("keep temp file in", &self.dir, e.error))
    }
}

impl Default for TempLocation {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_system_uses_env_temp_dir() {
        let location = TempLocation::system();
        assert_eq!(location.dir(), std::env::temp_dir().as_path());
        assert_eq!(location.prefix(), "LOG");
    }

    #[test]
    fn test_create_file_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        let location = TempLocation::in_dir(temp_dir.path());

        let path = location.create_file().unwrap();
        assert!(path.exists());
        assert_eq!(path.parent(), Some(temp_dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("LOG"));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_create_file_names_are_unique() {
        let temp_dir = TempDir::new().unwrap();
        let location = TempLocation::in_dir(temp_dir.path());

        let a = location.create_file().unwrap();
        let b = location.create_file().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_create_file_in_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let location = TempLocation::in_dir(temp_dir.path().join("missing"));

        let err = location.create_file().unwrap_err();
        assert!(matches!(err, LogError::Filesystem { .. }));
    }
}
