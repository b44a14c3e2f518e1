use super::types::Card;
use super::{CardRepository, FeedError};
use async_trait::async_trait;
use std::sync::Arc;

/// Tries `primary` first on every call; any failure falls through to `fallback`.
///
/// The primary error is logged and dropped. Only the fallback's outcome
/// reaches the caller.
pub struct CompositeCardRepository {
    primary: Arc<dyn CardRepository>,
    fallback: Arc<dyn CardRepository>,
}

impl CompositeCardRepository {
    pub fn new(primary: Arc<dyn CardRepository>, fallback: Arc<dyn CardRepository>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl CardRepository for CompositeCardRepository {
    async fn fetch_cards(&self) -> Result<Vec<Card>, FeedError> {
        match self.primary.fetch_cards().await {
            Ok(cards) => Ok(cards),
            Err(e) => {
                tracing::warn!(
                    primary = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %e,
                    "primary card source failed, falling back"
                );
                self.fallback.fetch_cards().await
            }
        }
    }

    fn name(&self) -> &str {
        "composite"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct StubRepo {
        pub result: Result<Vec<Card>, FeedError>,
        pub calls: AtomicUsize,
    }

    impl StubRepo {
        pub fn new(result: Result<Vec<Card>, FeedError>) -> Arc<Self> {
            Arc::new(Self { result, calls: AtomicUsize::new(0) })
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CardRepository for StubRepo {
        async fn fetch_cards(&self) -> Result<Vec<Card>, FeedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn test_uses_primary_on_success() {
        let primary = StubRepo::new(Ok(vec![Card::titled("P")]));
        let fallback = StubRepo::new(Ok(vec![Card::titled("F")]));
        let repo = CompositeCardRepository::new(primary.clone(), fallback.clone());

        assert_eq!(repo.fetch_cards().await.unwrap(), vec![Card::titled("P")]);
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_falls_back_on_primary_failure() {
        let primary = StubRepo::new(Err(FeedError::NetworkError("offline".to_string())));
        let fallback = StubRepo::new(Ok(vec![Card::titled("F")]));
        let repo = CompositeCardRepository::new(primary.clone(), fallback.clone());

        assert_eq!(repo.fetch_cards().await.unwrap(), vec![Card::titled("F")]);
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_surfaces_only_fallback_error() {
        let primary = StubRepo::new(Err(FeedError::InvalidResponse { status: 500 }));
        let fallback = StubRepo::new(Err(FeedError::ResourceNotFound { name: "exploreData".to_string() }));
        let repo = CompositeCardRepository::new(primary, fallback);

        assert_eq!(
            repo.fetch_cards().await.unwrap_err(),
            FeedError::ResourceNotFound { name: "exploreData".to_string() }
        );
    }

    #[tokio::test]
    async fn test_primary_attempted_every_call() {
        let primary = StubRepo::new(Err(FeedError::InvalidResponse { status: 404 }));
        let fallback = StubRepo::new(Ok(vec![]));
        let repo = CompositeCardRepository::new(primary.clone(), fallback.clone());

        for _ in 0..3 {
            repo.fetch_cards().await.unwrap();
        }
        assert_eq!(primary.calls(), 3);
        assert_eq!(fallback.calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_primary_result_is_not_a_failure() {
        let primary = StubRepo::new(Ok(vec![]));
        let fallback = StubRepo::new(Ok(vec![Card::titled("F")]));
        let repo = CompositeCardRepository::new(primary, fallback.clone());

        assert!(repo.fetch_cards().await.unwrap().is_empty());
        assert_eq!(fallback.calls(), 0);
    }
}
