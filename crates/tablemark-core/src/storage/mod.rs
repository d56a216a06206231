//! Persistence of annotation blocks.
//!
//! The store is always updated locally first. Saving is a separate,
//! fallible step whose failure is reported but never rolls anything back.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::annotation::AnnotationBlock;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Annotations not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A failed submit or delete, as shown to the user.
#[derive(Debug, Error)]
#[error("{source}\n\nCannot submit annotations!")]
pub struct SubmitError {
    #[from]
    pub source: StorageError,
}

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// The full block list, encoded as a JSON array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationPayload {
    json: String,
}

impl AnnotationPayload {
    pub fn from_blocks(blocks: &[AnnotationBlock]) -> StorageResult<Self> {
        let json = serde_json::to_string(blocks).map_err(|e| StorageError::Serialization(e.to_string()))?;
        Ok(Self { json })
    }

    /// Wrap already encoded JSON, checking that it decodes.
    pub fn from_json(json: impl Into<String>) -> StorageResult<Self> {
        let payload = Self { json: json.into() };
        payload.to_blocks()?;
        Ok(payload)
    }

    pub fn to_blocks(&self) -> StorageResult<Vec<AnnotationBlock>> {
        serde_json::from_str(&self.json).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.json
    }
}

/// Backend that receives the annotation list of a project.
pub trait AnnotationStorage: Send + Sync {
    /// Replace the stored annotations of a project.
    fn save(&self, project: &str, payload: &AnnotationPayload) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the stored annotations of a project.
    fn load(&self, project: &str) -> BoxFuture<'_, StorageResult<AnnotationPayload>>;

    /// Forget a project's annotations.
    fn delete(&self, project: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// Check if a project has stored annotations.
    fn exists(&self, project: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Send the payload to storage, turning failures into a user-facing error.
pub async fn persist<S: AnnotationStorage + ?Sized>(
    storage: &S,
    project: &str,
    payload: &AnnotationPayload,
) -> Result<(), SubmitError> {
    match storage.save(project, payload).await {
        Ok(()) => {
            log::info!("Saved annotations for {}", project);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to save annotations for {}: {}", project, e);
            Err(SubmitError::from(e))
        }
    }
}

/// Load a project's blocks; a project without annotations yields none.
pub async fn load_blocks<S: AnnotationStorage + ?Sized>(
    storage: &S,
    project: &str,
) -> StorageResult<Vec<AnnotationBlock>> {
    match storage.load(project).await {
        Ok(payload) => payload.to_blocks(),
        Err(StorageError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rectangle;
    use pollster::block_on;

    struct FailingStorage;

    impl AnnotationStorage for FailingStorage {
        fn save(&self, _project: &str, _payload: &AnnotationPayload) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Err(StorageError::Io("backend unreachable".to_string())) })
        }

        fn load(&self, project: &str) -> BoxFuture<'_, StorageResult<AnnotationPayload>> {
            let project = project.to_string();
            Box::pin(async move { Err(StorageError::NotFound(project)) })
        }

        fn delete(&self, _project: &str) -> BoxFuture<'_, StorageResult<()>> {
            Box::pin(async { Ok(()) })
        }

        fn exists(&self, _project: &str) -> BoxFuture<'_, StorageResult<bool>> {
            Box::pin(async { Ok(false) })
        }
    }

    #[test]
    fn test_submit_error_message() {
        let payload = AnnotationPayload::from_blocks(&[]).unwrap();
        let err = block_on(persist(&FailingStorage, "demo", &payload)).unwrap_err();
        assert_eq!(err.to_string(), "IO error: backend unreachable\n\nCannot submit annotations!");
    }

    #[test]
    fn test_missing_project_loads_empty() {
        let blocks = block_on(load_blocks(&FailingStorage, "demo")).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_payload_round_trip() {
        let blocks = vec![AnnotationBlock::new(vec![Rectangle::new(1, 1, 1, 3)]).with_role("mainSubject")];
        let payload = AnnotationPayload::from_blocks(&blocks).unwrap();
        assert_eq!(
            payload.as_str(),
            r#"[{"selections":[{"x1":1,"y1":1,"x2":1,"y2":3}],"role":"mainSubject"}]"#
        );
        let decoded = payload.to_blocks().unwrap();
        assert_eq!(decoded[0].selections, blocks[0].selections);
        assert_eq!(decoded[0].role(), Some("mainSubject"));
    }

    #[test]
    fn test_payload_rejects_bad_json() {
        assert!(matches!(
            AnnotationPayload::from_json("{not json"),
            Err(StorageError::Serialization(_))
        ));
    }
}
