use super::types::{decode_cards, Card};
use super::{CardRepository, FeedError};
use crate::http::HttpTransport;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetches cards with a single GET against the explore endpoint.
pub struct RemoteCardRepository {
    transport: Arc<dyn HttpTransport>,
    url: String,
}

impl RemoteCardRepository {
    pub fn new(transport: Arc<dyn HttpTransport>, url: &str) -> Self {
        Self {
            transport,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl CardRepository for RemoteCardRepository {
    async fn fetch_cards(&self) -> Result<Vec<Card>, FeedError> {
        let resp = self.transport.get(&self.url).await?;

        if !resp.is_success() {
            tracing::debug!(source = self.name(), url = %self.url, status = resp.status, "rejecting response");
            return Err(FeedError::InvalidResponse { status: resp.status });
        }

        let cards = decode_cards(&resp.body)?;
        tracing::debug!(source = self.name(), count = cards.len(), "loaded remote cards");
        Ok(cards)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
