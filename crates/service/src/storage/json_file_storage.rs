use std::{fs, io, path::PathBuf};

use tracing::debug;

use super::BlobStorage;
use crate::errors::ServiceError;

/// File-backed blob storage: each key is a `<key>.json` file inside one directory.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Initialize the storage rooted at `dir`. Creates the directory if missing.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Result<Self, ServiceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| ServiceError::Persistence(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, ServiceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::Persistence(format!("{}: {}", path.display(), e))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| ServiceError::Persistence(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| ServiceError::Persistence(format!("{}: {}", path.display(), e)))?;
        debug!(key, bytes = value.len(), "blob written");
        Ok(())
    }
}
