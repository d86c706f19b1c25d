use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::key::StorageKey;
use crate::traits::PactumStorage;

/// Durable backend storing each key as `<dir>/<key>.json`.
///
/// Saves write to a temp file in the same directory and rename it over
/// the target, so a crash mid-save leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| StorageError::Open {
            path: dir.clone(),
            source,
        })?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(FileStorage { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl PactumStorage for FileStorage {
    fn load(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { key, source }),
        }
    }

    fn save(&mut self, key: StorageKey, payload: &str) -> Result<(), StorageError> {
        let io = |source: std::io::Error| StorageError::Io { key, source };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io)?;
        tmp.write_all(payload.as_bytes()).map_err(io)?;
        tmp.as_file().sync_all().map_err(io)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| StorageError::Io { key, source: e.error })?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("store");
        let s = FileStorage::open(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(s.dir(), dir.as_path());
    }

    #[test]
    fn writes_one_file_per_key() {
        let tmp = tempfile::tempdir().unwrap();
        let mut s = FileStorage::open(tmp.path()).unwrap();
        s.save(StorageKey::Blueprints, "[]").unwrap();
        s.save(StorageKey::Contracts, "[1]").unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("contract_blueprints.json")).unwrap(),
            "[]"
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("contracts.json")).unwrap(),
            "[1]"
        );
        let leftovers = std::fs::read_dir(tmp.path()).unwrap().count();
        assert_eq!(leftovers, 2, "temp files must not be left behind");
    }

    #[test]
    fn reopened_storage_sees_saved_documents() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut s = FileStorage::open(tmp.path()).unwrap();
            s.save(StorageKey::Contracts, "[\"x\"]").unwrap();
        }
        let s = FileStorage::open(tmp.path()).unwrap();
        assert_eq!(
            s.load(StorageKey::Contracts).unwrap().as_deref(),
            Some("[\"x\"]")
        );
        assert_eq!(s.load(StorageKey::Blueprints).unwrap(), None);
    }
}
