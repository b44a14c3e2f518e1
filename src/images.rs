//! Async image loading with an in-memory cache.
//!
//! The cache is unbounded and lives as long as the loader. Concurrent misses
//! for the same URL share one request.

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::feed::types::{Card, ImageSource};
use crate::feed::FeedError;
use crate::http::HttpTransport;
use reqwest::Url;

#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn image_data(&self, url: &str) -> Result<Bytes, FeedError>;
}

type PendingFetch = Shared<BoxFuture<'static, Result<Bytes, FeedError>>>;

enum Slot {
    Ready(Bytes),
    Pending(PendingFetch),
}

pub struct CachingImageLoader {
    transport: Arc<dyn HttpTransport>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl CachingImageLoader {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Number of images held in the cache (in-flight fetches excluded).
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|s| matches!(s, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Background image bytes for a card. Asset images and cards without an
    /// image yield `None`; only remote images are fetched.
    pub async fn load_card_image(&self, card: &Card) -> Result<Option<Bytes>, FeedError> {
        match card.image_source() {
            Some(ImageSource::Remote(url)) => self.image_data(url.as_str()).await.map(Some),
            Some(ImageSource::Asset(_)) | None => Ok(None),
        }
    }

    /// Cache key for a URL: its parsed, normalized form when it parses,
    /// otherwise the trimmed text.
    fn cache_key(url: &str) -> String {
        let url = url.trim();
        Url::parse(url).map(|u| u.as_str().to_string()).unwrap_or_else(|_| url.to_string())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Slots are only replaced wholesale, so a poisoned map is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch(&self, url: &str) -> PendingFetch {
        let transport = Arc::clone(&self.transport);
        let url = url.to_string();
        async move {
            let resp = transport.get(&url).await?;
            if !resp.is_success() {
                return Err(FeedError::InvalidResponse { status: resp.status });
            }
            Ok(resp.body)
        }
        .boxed()
        .shared()
    }
}

#[async_trait]
impl ImageLoader for CachingImageLoader {
    async fn image_data(&self, url: &str) -> Result<Bytes, FeedError> {
        let key = Self::cache_key(url);
        let pending = {
            let mut slots = self.lock();
            match slots.get(&key) {
                Some(Slot::Ready(bytes)) => {
                    tracing::debug!(url = %key, "image cache hit");
                    return Ok(bytes.clone());
                }
                Some(Slot::Pending(fetch)) => {
                    tracing::debug!(url = %key, "joining in-flight image fetch");
                    fetch.clone()
                }
                None => {
                    tracing::debug!(url = %key, "image cache miss");
                    let fetch = self.fetch(&key);
                    slots.insert(key.clone(), Slot::Pending(fetch.clone()));
                    fetch
                }
            }
        };

        let result = pending.clone().await;

        let mut slots = self.lock();
        // Only the fetch we awaited may settle its slot.
        let ours = matches!(slots.get(&key), Some(Slot::Pending(f)) if f.ptr_eq(&pending));
        if ours {
            match &result {
                Ok(bytes) => {
                    slots.insert(key, Slot::Ready(bytes.clone()));
                }
                Err(e) => {
                    tracing::warn!(url = %key, error = %e, "image fetch failed");
                    slots.remove(&key);
                }
            }
        }
        result
    }
}
