//! Filesystem operations
//!
//! Handles file and directory operations on package working copies.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// A missing directory is not an error.
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_dir_all_missing_is_ok() {
        let temp = TempDir::new().unwrap();
        assert!(remove_dir_all(&temp.path().join("absent")).is_ok());
    }

    #[test]
    fn test_remove_dir_all_nested() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("packages/frr");
        create_dir_all(&dir.join("debian")).unwrap();
        std::fs::write(dir.join("debian/control"), "Source: frr\n").unwrap();

        remove_dir_all(&dir).unwrap();
        assert!(!dir.exists());
        assert!(temp.path().join("packages").exists());
    }

    #[test]
    fn test_read_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = read_file(&temp.path().join("debforge.toml")).unwrap_err();
        assert!(matches!(err, FilesystemError::ReadFile { .. }));
    }
}
