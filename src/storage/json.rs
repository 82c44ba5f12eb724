//! JSON file storage.
//!
//! Reads the instructor directory from a JSON array on every load, so edits
//! to the file are picked up without a restart.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{StorageError, StorageResult, TeacherStorage};
use crate::models::Teacher;

/// Storage backed by a JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    label: String,
}

impl JsonFileStorage {
    /// Create a storage reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    /// Path of the data file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TeacherStorage for JsonFileStorage {
    async fn load_teachers(&self) -> StorageResult<Vec<Teacher>> {
        let data = tokio::fs::read_to_string(&self.path).await?;
        let teachers: Vec<Teacher> =
            serde_json::from_str(&data).map_err(|e| StorageError::ParseError(e.to_string()))?;

        debug!(path = %self.label, count = teachers.len(), "Loaded teacher data");
        Ok(teachers)
    }

    fn name(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_or_empty;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_loads_records_in_file_order() {
        let file = write_file(
            r#"[
                {"id": 1, "name": "Jānis Kalniņš", "degree": "Dr. sc. ing.", "position": "profesors",
                 "department": "Datoru sistēmu institūts", "courses": ["Programmēšana"]},
                {"id": 2, "name": "Ilze Ozola", "degree": "Mg. math.", "position": "lektore",
                 "department": "Matemātikas institūts", "courses": []}
            ]"#,
        );

        let storage = JsonFileStorage::new(file.path());
        let teachers = storage.load_teachers().await.unwrap();

        assert_eq!(teachers.len(), 2);
        assert_eq!(teachers[0].name, "Jānis Kalniņš");
        assert_eq!(teachers[1].degree, "Mg. math.");
    }

    #[tokio::test]
    async fn test_null_field_does_not_drop_directory() {
        let file = write_file(
            r#"[{"id": 1, "name": "Anna", "degree": "Mg. sc."},
                {"id": 2, "name": "Jānis", "degree": null, "courses": null}]"#,
        );

        let teachers = load_or_empty(&JsonFileStorage::new(file.path())).await;

        assert_eq!(teachers.len(), 2);
        assert_eq!(teachers[1].name, "Jānis");
        assert_eq!(teachers[1].degree, "");
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing.json"));

        assert!(matches!(
            storage.load_teachers().await,
            Err(StorageError::IoError(_))
        ));
        assert!(load_or_empty(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let file = write_file("{ not json");
        let storage = JsonFileStorage::new(file.path());

        assert!(matches!(
            storage.load_teachers().await,
            Err(StorageError::ParseError(_))
        ));
        assert!(load_or_empty(&storage).await.is_empty());
    }
}
