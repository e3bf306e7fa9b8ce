// ABOUTME: Output store backed by a JSON file written by provisioning.
// ABOUTME: The file is re-read on every lookup; a missing file means nothing is published.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{OutputError, OutputStore};

/// Reads outputs from a flat JSON object such as `{"docsBucketName": "..."}`.
#[derive(Debug, Clone)]
pub struct FileOutputStore {
    path: PathBuf,
}

impl FileOutputStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<Map<String, Value>>, OutputError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(OutputError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| OutputError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl OutputStore for FileOutputStore {
    async fn get(&self, key: &str) -> Result<Option<String>, OutputError> {
        let Some(outputs) = self.read().await? else {
            return Ok(None);
        };

        Ok(match outputs.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_resolves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileOutputStore::new(dir.path().join("outputs.json"));
        assert_eq!(store.get("docsBucketName").await.unwrap(), None);
    }

    #[tokio::test]
    async fn reads_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs.json");
        std::fs::write(&path, r#"{"docsBucketName": "docs-bucket-123", "docsDomain": null}"#)
            .unwrap();

        let store = FileOutputStore::new(&path);
        assert_eq!(
            store.get("docsBucketName").await.unwrap().as_deref(),
            Some("docs-bucket-123")
        );
        assert_eq!(store.get("docsDomain").await.unwrap(), None);
        assert_eq!(store.get("docsCName").await.unwrap(), None);
    }

    #[tokio::test]
    async fn every_lookup_sees_the_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs.json");
        let store = FileOutputStore::new(&path);

        assert_eq!(store.get("docsBucketName").await.unwrap(), None);
        std::fs::write(&path, r#"{"docsBucketName": "later"}"#).unwrap();
        assert_eq!(
            store.get("docsBucketName").await.unwrap().as_deref(),
            Some("later")
        );
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outputs.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileOutputStore::new(&path).get("x").await.unwrap_err();
        assert!(matches!(err, OutputError::Parse { .. }));
    }
}
