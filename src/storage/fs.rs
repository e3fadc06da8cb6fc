//! Filesystem implementation of the output store

use crate::storage::traits::{OutputStore, StorageError, StorageResult};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Output store rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`, creating the root if needed
    pub fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(|source| StorageError::CreateDir {
            name: root.display().to_string(),
            source,
        })?;
        Ok(FsStore { root })
    }

    /// Returns the output root path
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputStore for FsStore {
    fn create_subdir(&self, name: &str) -> StorageResult<PathBuf> {
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            name: dir.display().to_string(),
            source,
        })?;
        Ok(dir)
    }

    fn create_file(&self, dir: &Path, name: &str) -> StorageResult<File> {
        let path = dir.join(name);
        File::create(&path).map_err(|source| StorageError::CreateFile {
            name: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new_creates_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested").join("out");
        let store = FsStore::new(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_create_subdir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path()).unwrap();

        let dir = store.create_subdir("Fluff_pdf").unwrap();
        assert!(dir.is_dir());
        assert_eq!(dir, tmp.path().join("Fluff_pdf"));
    }

    #[test]
    fn test_create_subdir_is_reusable() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path()).unwrap();

        let first = store.create_subdir("tag_epub").unwrap();
        let second = store.create_subdir("tag_epub").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_create_file_and_write() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path()).unwrap();
        let dir = store.create_subdir("tag_pdf").unwrap();

        let mut file = store.create_file(&dir, "title_123.pdf").unwrap();
        file.write_all(b"content").unwrap();
        drop(file);

        let written = std::fs::read(dir.join("title_123.pdf")).unwrap();
        assert_eq!(written, b"content");
    }

    #[test]
    fn test_create_file_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path()).unwrap();
        let dir = store.create_subdir("tag_pdf").unwrap();

        let mut file = store.create_file(&dir, "work.pdf").unwrap();
        file.write_all(b"first attempt with a longer body").unwrap();
        drop(file);

        let mut file = store.create_file(&dir, "work.pdf").unwrap();
        file.write_all(b"second").unwrap();
        drop(file);

        let written = std::fs::read(dir.join("work.pdf")).unwrap();
        assert_eq!(written, b"second");
    }
}
