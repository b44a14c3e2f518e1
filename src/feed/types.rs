use reqwest::Url;
use serde::{Deserialize, Serialize};

/// One explore-feed entry as served by the endpoint / bundled JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<Action>>,
    #[serde(default)]
    pub promo_message: Option<String>,
    #[serde(default)]
    pub top_description: Option<String>,
    /// May contain HTML markup; rendering it is up to the UI.
    #[serde(default)]
    pub bottom_description: Option<String>,
}

/// A button on a card: label plus the link it opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: String,
    pub title: String,
}

/// Where a card's background image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Remote(Url),
    /// Local asset identifier, resolved by the renderer.
    Asset(String),
}

impl ImageSource {
    /// Classify a raw `backgroundImage` value. Anything that parses with a
    /// scheme is remote; empty values have no image.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match Url::parse(raw) {
            Ok(url) => Some(ImageSource::Remote(url)),
            Err(_) => Some(ImageSource::Asset(raw.to_string())),
        }
    }
}

impl Card {
    /// Card with only the mandatory title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            background_image: None,
            content: None,
            promo_message: None,
            top_description: None,
            bottom_description: None,
        }
    }

    pub fn image_source(&self) -> Option<ImageSource> {
        self.background_image.as_deref().and_then(ImageSource::parse)
    }

    pub fn actions(&self) -> &[Action] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// Decode a JSON array of cards, keeping payload order.
pub fn decode_cards(bytes: &[u8]) -> Result<Vec<Card>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
