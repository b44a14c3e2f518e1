pub mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::feed::CardRepository;
pub use state::{ErrorAlert, ExploreState, LoadPhase};

/// Drives card loads and publishes the resulting state.
///
/// Loads may overlap; each carries a generation number and only the most
/// recently started one commits its outcome.
pub struct ExploreViewModel {
    repository: Arc<dyn CardRepository>,
    alert_title: String,
    generation: AtomicU64,
    state_tx: watch::Sender<ExploreState>,
}

impl ExploreViewModel {
    pub fn new(repository: Arc<dyn CardRepository>, alert_title: impl Into<String>) -> Self {
        let (state_tx, _) = watch::channel(ExploreState::new());
        Self {
            repository,
            alert_title: alert_title.into(),
            generation: AtomicU64::new(0),
            state_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ExploreState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> ExploreState {
        self.state_tx.borrow().clone()
    }

    /// Current error paired with the configured dialog title.
    pub fn error_alert(&self) -> Option<ErrorAlert> {
        self.state_tx.borrow().error_message.as_ref().map(|message| ErrorAlert {
            title: self.alert_title.clone(),
            message: message.clone(),
        })
    }

    pub async fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state_tx.send_modify(|s| s.begin_load());

        let result = self.repository.fetch_cards().await;

        let committed = self.state_tx.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(cards) => {
                    tracing::info!(source = self.repository.name(), count = cards.len(), "cards loaded");
                    s.finish_load(cards);
                }
                Err(e) => {
                    tracing::warn!(source = self.repository.name(), error = %e, "card load failed");
                    s.fail_load(e.to_string());
                }
            }
            true
        });

        if !committed {
            tracing::debug!(generation, "discarding superseded load");
        }
    }
}
