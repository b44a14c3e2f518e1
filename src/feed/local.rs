use super::types::{decode_cards, Card};
use super::{CardRepository, FeedError};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves logical resource names to files, like an app bundle.
pub trait ResourceBundle: Send + Sync {
    fn resolve(&self, name: &str, extension: &str) -> Option<PathBuf>;
}

/// Bundle backed by a plain directory: `<root>/<name>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirectoryBundle {
    root: PathBuf,
}

impl DirectoryBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceBundle for DirectoryBundle {
    fn resolve(&self, name: &str, extension: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let path = self.root.join(format!("{}.{}", name, extension));
        path.is_file().then_some(path)
    }
}

/// Reads cards from a bundled JSON resource. Re-reads on every call.
pub struct LocalCardRepository {
    bundle: Arc<dyn ResourceBundle>,
    file_name: String,
}

impl LocalCardRepository {
    pub fn new(bundle: Arc<dyn ResourceBundle>, file_name: &str) -> Self {
        Self {
            bundle,
            file_name: file_name.to_string(),
        }
    }
}

#[async_trait]
impl CardRepository for LocalCardRepository {
    async fn fetch_cards(&self) -> Result<Vec<Card>, FeedError> {
        let path = self
            .bundle
            .resolve(&self.file_name, "json")
            .ok_or_else(|| FeedError::ResourceNotFound {
                name: self.file_name.clone(),
            })?;

        let data = tokio::fs::read(&path).await.map_err(|e| FeedError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let cards = decode_cards(&data)?;
        tracing::debug!(source = self.name(), count = cards.len(), path = %path.display(), "loaded local cards");
        Ok(cards)
    }

    fn name(&self) -> &str {
        "local"
    }
}
