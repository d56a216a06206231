//! File-based storage implementation.

use super::{AnnotationPayload, AnnotationStorage, BoxFuture, StorageError, StorageResult};
use std::fs;
use std::path::PathBuf;

const FILE_SUFFIX: &str = ".annotations.json";

/// Stores each project's annotations as a JSON file in one directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StorageError::Io(format!("Failed to create storage directory: {}", e)))?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the platform data directory
    /// (e.g. `~/.local/share/tablemark/annotations/`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("tablemark").join("annotations"))
    }

    /// File path for a project; the name is sanitized for the filesystem.
    fn project_path(&self, project: &str) -> PathBuf {
        let safe: String = project
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}{}", safe, FILE_SUFFIX))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl AnnotationStorage for FileStorage {
    fn save(&self, project: &str, payload: &AnnotationPayload) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.project_path(project);
        let json = payload.as_str().to_string();
        Box::pin(async move {
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
        })
    }

    fn load(&self, project: &str) -> BoxFuture<'_, StorageResult<AnnotationPayload>> {
        let path = self.project_path(project);
        let project = project.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(project));
            }
            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
            AnnotationPayload::from_json(json).map_err(|e| match e {
                StorageError::Serialization(msg) => {
                    StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), msg))
                }
                other => other,
            })
        })
    }

    fn delete(&self, project: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.project_path(project);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| StorageError::Io(format!("Failed to delete {}: {}", path.display(), e)))?;
            }
            Ok(())
        })
    }

    fn exists(&self, project: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.project_path(project);
        Box::pin(async move { Ok(path.exists()) })
    }
}
