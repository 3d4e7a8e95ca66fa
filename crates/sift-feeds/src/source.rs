//! Async loading of feed blobs from disk.

use std::path::Path;

use crate::error::FeedError;
use crate::Archiver;

/// Read and parse the JSON blob at `path`.
pub async fn load(path: &Path) -> Result<serde_json::Value, FeedError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let blob = serde_json::from_slice(&bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "feed loaded");
    Ok(blob)
}

/// Load the blob at `path` and unzip it with `archiver`.
pub async fn load_records<A: Archiver>(path: &Path, archiver: &A) -> Result<Vec<A::Record>, FeedError> {
    let blob = load(path).await?;
    let records = archiver.unzip(blob)?;
    tracing::debug!(records = records.len(), "feed unzipped");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CourseArchiver;

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }

    #[tokio::test]
    async fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load(&path).await.unwrap_err();
        assert!(matches!(err, FeedError::Decode(_)));
    }

    #[tokio::test]
    async fn loads_and_unzips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");
        std::fs::write(&path, r#"[{"alias": "a", "name": "A"}]"#).unwrap();
        let records = load_records(&path, &CourseArchiver).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].alias, "a");
    }
}
