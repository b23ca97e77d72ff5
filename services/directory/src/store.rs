use std::io::Write as _;
use std::path::{Path, PathBuf};

use models::Record;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid user list in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Flat JSON file holding the whole user list.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted list, or an empty one when the file is absent.
    ///
    /// Every entry must be a JSON object; anything else is a `Json` error.
    pub fn load(&self) -> Result<Vec<Record>, StoreError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_slice(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the file with `users`, pretty-printed.
    ///
    /// Bytes land in a hidden sibling first and are renamed over the target,
    /// so readers only ever observe a complete list.
    pub fn save(&self, users: &[Record]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(users).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let tmp = parent.join(format!(
            ".{}.tmp.{}",
            self.path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("users.json"),
            std::process::id()
        ));
        {
            let mut f = std::fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
            f.write_all(&bytes).map_err(|e| self.io_error(e))?;
            f.sync_all().map_err(|e| self.io_error(e))?;
        }
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(self.io_error(source));
        }
        if let Ok(dir) = std::fs::File::open(&parent) {
            let _ = dir.sync_all();
        }
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
