pub mod composite;
pub mod local;
pub mod remote;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;
use types::Card;

pub use composite::CompositeCardRepository;
pub use local::{DirectoryBundle, LocalCardRepository, ResourceBundle};
pub use remote::RemoteCardRepository;

/// Errors surfaced by card sources and the image loader.
///
/// Messages are shown to the user as-is by the view model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("resource '{name}' not found")]
    ResourceNotFound { name: String },
    #[error("failed to read {path}: {message}")]
    ReadError { path: String, message: String },
    #[error("failed to decode data: {0}")]
    DecodeError(String),
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("invalid server response ({status})")]
    InvalidResponse { status: u16 },
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::DecodeError(e.to_string())
    }
}

impl From<crate::http::TransportError> for FeedError {
    fn from(e: crate::http::TransportError) -> Self {
        FeedError::NetworkError(e.0)
    }
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn fetch_cards(&self) -> Result<Vec<Card>, FeedError>;

    /// Short label for log fields.
    fn name(&self) -> &str;
}
