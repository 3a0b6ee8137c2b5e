//! File-backed storage: one file per key inside a directory.

use super::{Storage, StorageError};
use crate::config::ClientConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage that keeps each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// Opens the default storage directory.
    ///
    /// Returns `~/.config/rest-workbench` on Unix-like systems, or the
    /// roaming profile equivalent on Windows.
    pub fn open_default() -> Result<Self, StorageError> {
        let config_dir = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config")
        } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
            PathBuf::from(user_profile).join("AppData").join("Roaming")
        } else {
            return Err(StorageError::Unavailable(
                "Could not determine home directory".to_string(),
            ));
        };

        Self::open(config_dir.join("rest-workbench"))
    }

    /// Opens `config.storage_dir`, or the default directory when unset.
    pub fn from_config(config: &ClientConfig) -> Result<Self, StorageError> {
        match &config.storage_dir {
            Some(dir) => Self::open(dir.clone()),
            None => Self::open_default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Written beside the target, then renamed over it
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
