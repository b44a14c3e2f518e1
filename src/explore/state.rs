use chrono::{DateTime, Utc};

use crate::feed::types::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Snapshot published to the UI after every transition.
#[derive(Debug, Clone)]
pub struct ExploreState {
    pub cards: Vec<Card>,
    pub phase: LoadPhase,
    pub error_message: Option<String>,
    /// Completion time of the last successful load.
    pub last_loaded_at: Option<DateTime<Utc>>,
}

/// What the UI puts in its failure dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorAlert {
    pub title: String,
    pub message: String,
}

impl ExploreState {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            phase: LoadPhase::Idle,
            error_message: None,
            last_loaded_at: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub(crate) fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
        self.error_message = None;
    }

    pub(crate) fn finish_load(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.error_message = None;
        self.phase = LoadPhase::Loaded;
        self.last_loaded_at = Some(Utc::now());
    }

    pub(crate) fn fail_load(&mut self, message: String) {
        self.cards.clear();
        self.error_message = Some(message);
        self.phase = LoadPhase::Errored;
    }
}

impl Default for ExploreState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut s = ExploreState::new();
        assert_eq!(s.phase, LoadPhase::Idle);
        assert!(!s.is_loading());

        s.begin_load();
        assert!(s.is_loading());

        s.finish_load(vec![Card::titled("A")]);
        assert_eq!(s.phase, LoadPhase::Loaded);
        assert_eq!(s.cards.len(), 1);
        assert!(s.last_loaded_at.is_some());

        s.begin_load();
        s.fail_load("network error: offline".to_string());
        assert_eq!(s.phase, LoadPhase::Errored);
        assert!(s.cards.is_empty());
        assert_eq!(s.error_message.as_deref(), Some("network error: offline"));

        s.begin_load();
        assert_eq!(s.error_message, None);
    }
}
