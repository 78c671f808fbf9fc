//! Local directory content source.
//!
//! Reads documents straight from a site directory (the project root or a
//! build output), which is what `render` uses when no base URL is given.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::ContentSource;
use crate::content::ContentDocument;
use crate::error::LoadError;

/// Reads documents from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, resource: &str) -> Option<PathBuf> {
        let relative = Path::new(resource.trim_start_matches('/'));
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

#[async_trait]
impl ContentSource for DirSource {
    async fn fetch(&self, resource: &str) -> Result<ContentDocument, LoadError> {
        let Some(path) = self.path_for(resource) else {
            return Err(LoadError::Fetch {
                resource: resource.to_string(),
                reason: "resource path escapes the site directory".to_string(),
            });
        };
        debug!(path = %path.display(), "reading content");

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => LoadError::Status {
                resource: resource.to_string(),
                status: 404,
            },
            _ => LoadError::Fetch {
                resource: resource.to_string(),
                reason: e.to_string(),
            },
        })?;

        ContentDocument::from_slice(&bytes).map_err(|e| LoadError::Parse {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_and_parses() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("data")).unwrap();
        std::fs::write(
            tmp.path().join("data/content.json"),
            r#"{"welcome": "Sample"}"#,
        )
        .unwrap();

        let source = DirSource::new(tmp.path());
        let doc = source.fetch("data/content.json").await.unwrap();
        assert_eq!(doc.welcome.as_deref(), Some("Sample"));
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DirSource::new(tmp.path())
            .fetch("data/brave-otter-a1b2c3.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("bad.json"), "{ nope").unwrap();
        let err = DirSource::new(tmp.path())
            .fetch("bad.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let err = DirSource::new(tmp.path().join("site"))
            .fetch("../secret.json")
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
    }
}
