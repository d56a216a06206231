//! In-memory storage implementation.

use super::{AnnotationPayload, AnnotationStorage, BoxFuture, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    projects: RwLock<HashMap<String, AnnotationPayload>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationStorage for MemoryStorage {
    fn save(&self, project: &str, payload: &AnnotationPayload) -> BoxFuture<'_, StorageResult<()>> {
        let project = project.to_string();
        let payload = payload.clone();
        Box::pin(async move {
            let mut projects = self
                .projects
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            projects.insert(project, payload);
            Ok(())
        })
    }

    fn load(&self, project: &str) -> BoxFuture<'_, StorageResult<AnnotationPayload>> {
        let project = project.to_string();
        Box::pin(async move {
            let projects = self
                .projects
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            projects.get(&project).cloned().ok_or(StorageError::NotFound(project))
        })
    }

    fn delete(&self, project: &str) -> BoxFuture<'_, StorageResult<()>> {
        let project = project.to_string();
        Box::pin(async move {
            let mut projects = self
                .projects
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            projects.remove(&project);
            Ok(())
        })
    }

    fn exists(&self, project: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let project = project.to_string();
        Box::pin(async move {
            let projects = self
                .projects
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(projects.contains_key(&project))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationBlock;
    use crate::rectangle::Rectangle;
    use pollster::block_on;

    fn payload() -> AnnotationPayload {
        let blocks = vec![AnnotationBlock::new(vec![Rectangle::new(2, 2, 4, 9)]).with_role("dependentVar")];
        AnnotationPayload::from_blocks(&blocks).unwrap()
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        block_on(storage.save("census", &payload())).unwrap();
        let loaded = block_on(storage.load("census")).unwrap();
        assert_eq!(loaded, payload());
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_save_replaces_previous() {
        let storage = MemoryStorage::new();
        block_on(storage.save("census", &payload())).unwrap();
        let empty = AnnotationPayload::from_blocks(&[]).unwrap();
        block_on(storage.save("census", &empty)).unwrap();
        assert_eq!(block_on(storage.load("census")).unwrap().as_str(), "[]");
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        assert!(!block_on(storage.exists("census")).unwrap());
        block_on(storage.save("census", &payload())).unwrap();
        assert!(block_on(storage.exists("census")).unwrap());
        block_on(storage.delete("census")).unwrap();
        assert!(!block_on(storage.exists("census")).unwrap());
    }
}
