use super::KeyValueStore;
use crate::error::{FolioError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed store: each key is `<root>/<key>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FolioError::Store(format!("Invalid store key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FolioError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(FolioError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(FolioError::Io(e));
        }

        tracing::trace!(key, path = %path.display(), "wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(FolioError::Io)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;

    #[test]
    fn missing_key_reads_as_none() {
        let env = TestEnv::new();
        assert_eq!(env.store.get("folio_bookmarks").unwrap(), None);
    }

    #[test]
    fn set_creates_root_and_file() {
        let env = TestEnv::new();
        let nested = FileStore::new(env.root.join("a").join("b"));
        nested.set("k", "[1]").unwrap();
        assert_eq!(
            fs::read_to_string(env.root.join("a/b/k.json")).unwrap(),
            "[1]"
        );
        assert_eq!(nested.get("k").unwrap(), Some("[1]".to_string()));
    }

    #[test]
    fn rejects_path_like_keys() {
        let env = TestEnv::new();
        assert!(env.store.set("../escape", "x").is_err());
        assert!(env.store.get("").is_err());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let env = TestEnv::new();
        // A non-empty directory where the value file should go blocks the rename.
        fs::create_dir_all(env.root.join("blocked.json/inner")).unwrap();

        assert!(env.store.set("blocked", "[]").is_err());
        let leftovers: Vec<_> = fs::read_dir(&env.root)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
