//! File-based Local Storage Adapter
//!
//! Stores one file per key under a base directory. Key names are
//! sanitized into file names; the original key is kept in a small header
//! line so `keys()` can report it back unchanged.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{LocalStorage, StorageError};

const FILE_EXTENSION: &str = "json";
const KEY_HEADER: &str = "#key:";

/// File-based key-value storage
#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    base_path: PathBuf,
}

impl FileLocalStorage {
    /// Create a storage rooted at `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileLocalStorage::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a key
    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path
            .join(format!("{}.{}", sanitize(key), FILE_EXTENSION))
    }

    /// Ensure the base directory exists
    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::Unavailable(format!("{}: {}", self.base_path.display(), e))
        })
    }
}

/// Maps a key onto a safe file stem.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn split_header(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix(KEY_HEADER)?;
    rest.split_once('\n')
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.key_path(key);
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(
                split_header(&raw)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or(raw),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ensure_dir().await?;

        let path = self.key_path(key);
        let contents = format!("{}{}\n{}", KEY_HEADER, key, value);

        // Write next to the target and rename so readers never see half a file
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, contents)
            .await
            .map_err(|e| StorageError::write_rejected(key, e.to_string()))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| StorageError::write_rejected(key, e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.key_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut dir = match fs::read_dir(&self.base_path).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let mut keys = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let raw = fs::read_to_string(&path)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
            match split_header(&raw) {
                Some((key, _)) => keys.push(key.to_string()),
                None => {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(stem.to_string());
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
