//! Read-only record storage.
//!
//! This module defines the interface for loading instructor records. Records
//! are never written back; the store is a snapshot source for the search
//! pipeline. Load failures are reported through `StorageError`, and the
//! pipeline recovers from them with [`load_or_empty`]: a missing or corrupt
//! data file is served as an empty directory rather than a fault.

pub mod json;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::error;

use crate::models::Teacher;

pub use json::JsonFileStorage;

/// Errors that can occur while loading records.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read the data source
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse the data format
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for instructor record sources.
#[async_trait]
pub trait TeacherStorage: Send + Sync {
    /// Load every record, in source order.
    ///
    /// # Errors
    /// Returns `StorageError` if the source cannot be read or parsed
    async fn load_teachers(&self) -> StorageResult<Vec<Teacher>>;

    /// Get a human-readable name/description of this source.
    fn name(&self) -> &str;
}

#[async_trait]
impl<S: TeacherStorage + ?Sized> TeacherStorage for Arc<S> {
    async fn load_teachers(&self) -> StorageResult<Vec<Teacher>> {
        (**self).load_teachers().await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Load records, treating any failure as an empty set.
pub async fn load_or_empty<S: TeacherStorage + ?Sized>(storage: &S) -> Vec<Teacher> {
    match storage.load_teachers().await {
        Ok(teachers) => teachers,
        Err(e) => {
            error!(source = storage.name(), error = %e, "Failed to load teacher data");
            Vec::new()
        }
    }
}

/// Immutable in-memory snapshot of records.
///
/// Used as the record cache when the data file should be read only once.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    teachers: Arc<[Teacher]>,
}

impl MemoryStorage {
    /// Wrap a set of records.
    pub fn new(teachers: Vec<Teacher>) -> Self {
        Self {
            teachers: teachers.into(),
        }
    }

    /// Snapshot another source once; failures yield an empty snapshot.
    pub async fn snapshot<S: TeacherStorage + ?Sized>(source: &S) -> Self {
        Self::new(load_or_empty(source).await)
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }
}

#[async_trait]
impl TeacherStorage for MemoryStorage {
    async fn load_teachers(&self) -> StorageResult<Vec<Teacher>> {
        Ok(self.teachers.to_vec())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// The record source selected by configuration.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Re-read the JSON file on every load
    File(JsonFileStorage),

    /// Snapshot taken once at startup
    Cached(MemoryStorage),
}

impl DataSource {
    /// Open `path`, snapshotting it when `cache` is set.
    pub async fn open(path: impl Into<std::path::PathBuf>, cache: bool) -> Self {
        let file = JsonFileStorage::new(path);
        if cache {
            DataSource::Cached(MemoryStorage::snapshot(&file).await)
        } else {
            DataSource::File(file)
        }
    }
}

#[async_trait]
impl TeacherStorage for DataSource {
    async fn load_teachers(&self) -> StorageResult<Vec<Teacher>> {
        match self {
            DataSource::File(s) => s.load_teachers().await,
            DataSource::Cached(s) => s.load_teachers().await,
        }
    }

    fn name(&self) -> &str {
        match self {
            DataSource::File(s) => s.name(),
            DataSource::Cached(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStorage;

    #[async_trait]
    impl TeacherStorage for BrokenStorage {
        async fn load_teachers(&self) -> StorageResult<Vec<Teacher>> {
            Err(StorageError::ParseError("Mock storage failure".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn teacher(id: i64, name: &str) -> Teacher {
        Teacher::new(id, name)
    }

    #[tokio::test]
    async fn test_load_or_empty_swallows_errors() {
        assert!(load_or_empty(&BrokenStorage).await.is_empty());
    }

    #[tokio::test]
    async fn test_memory_storage_preserves_order() {
        let storage = MemoryStorage::new(vec![teacher(2, "B"), teacher(1, "A")]);
        let loaded = storage.load_teachers().await.unwrap();

        assert_eq!(storage.len(), 2);
        assert_eq!(loaded[0].name, "B");
        assert_eq!(loaded[1].name, "A");
    }

    #[tokio::test]
    async fn test_snapshot_of_broken_source_is_empty() {
        let snapshot = MemoryStorage::snapshot(&BrokenStorage).await;
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_cached_source_ignores_later_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("teachers.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "A"}]"#).unwrap();

        let cached = DataSource::open(&path, true).await;
        let live = DataSource::open(&path, false).await;
        std::fs::write(&path, r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#).unwrap();

        assert_eq!(load_or_empty(&cached).await.len(), 1);
        assert_eq!(load_or_empty(&live).await.len(), 2);
        assert_eq!(cached.name(), "memory");
    }

    #[tokio::test]
    async fn test_arc_storage_delegates() {
        let storage = Arc::new(MemoryStorage::new(vec![teacher(1, "A")]));
        assert_eq!(load_or_empty(&storage).await.len(), 1);
        assert_eq!(storage.name(), "memory");
    }
}
