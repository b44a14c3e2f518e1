use anyhow::Result;
use explore_feed::config::Config;
use explore_feed::explore::{ExploreViewModel, LoadPhase};
use explore_feed::http::ReqwestTransport;
use explore_feed::images::CachingImageLoader;
use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("explore_feed=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    let mut config = Config::load_or_default(&config_path)?;
    config.apply_env_overrides();
    config.validate()?;

    let transport = Arc::new(ReqwestTransport::new(&config.http)?);
    let repository = explore_feed::build_repository(&config, transport.clone());
    let view_model = ExploreViewModel::new(repository, config.explore.alert_title.clone());
    let images = CachingImageLoader::new(transport);

    view_model.load().await;
    let state = view_model.state();

    if state.phase == LoadPhase::Errored {
        if let Some(alert) = view_model.error_alert() {
            tracing::error!(title = %alert.title, "{}", alert.message);
        }
        std::process::exit(1);
    }

    // Image failures only cost that card its image.
    let results = join_all(state.cards.iter().map(|card| images.load_card_image(card))).await;

    for (card, image) in state.cards.iter().zip(results) {
        let image = match image {
            Ok(Some(bytes)) => format!("{} bytes", bytes.len()),
            Ok(None) => card.background_image.clone().unwrap_or_else(|| "-".to_string()),
            Err(e) => {
                tracing::warn!(title = %card.title, error = %e, "background image unavailable");
                "unavailable".to_string()
            }
        };
        println!("  {:<40} actions: {}  image: {}", card.title, card.actions().len(), image);
    }

    tracing::info!(
        cards = state.cards.len(),
        cached_images = images.len(),
        cell = %config.explore.cell_identifier,
        "explore feed ready"
    );
    Ok(())
}
