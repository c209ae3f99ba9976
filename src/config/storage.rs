use crate::core::Storage;
use crate::utils::error::{ConvertError, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Filesystem storage. Writes are staged in a temporary file next to the
/// destination and renamed over it, so a failed run never leaves a partial file.
#[derive(Debug, Clone)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|source| ConvertError::InputNotFound {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let write_err = |source: std::io::Error| ConvertError::Write {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        fs::create_dir_all(parent).map_err(write_err)?;

        let mut staged = NamedTempFile::new_in(parent).map_err(write_err)?;
        staged.write_all(data).map_err(write_err)?;
        staged.as_file().sync_all().map_err(write_err)?;

        // Keep the mode of a file we are replacing.
        if let Ok(existing) = fs::metadata(path) {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(write_err)?;
        }

        staged.persist(path).map_err(|e| write_err(e.error))?;
        tracing::debug!("Replaced {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.csv");
        fs::write(&path, "old content that is longer than the new one\n").unwrap();

        LocalStorage::new().write_file(&path, b"Date,Weight\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Date,Weight\n");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/weights.csv");

        LocalStorage::new().write_file(&path, b"Date,Weight\n").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_write_under_a_file_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "plain file").unwrap();

        let err = LocalStorage::new()
            .write_file(&blocker.join("weights.csv"), b"Date,Weight\n")
            .unwrap_err();

        assert!(matches!(err, ConvertError::Write { .. }));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "plain file");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .read_file(&dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::InputNotFound { .. }));
    }
}
