pub mod config;
pub mod explore;
pub mod feed;
pub mod http;
pub mod images;

use std::sync::Arc;

use config::Config;
use feed::{CardRepository, CompositeCardRepository, DirectoryBundle, LocalCardRepository, RemoteCardRepository};
use http::HttpTransport;

/// Remote endpoint first, bundled resource as fallback.
pub fn build_repository(config: &Config, transport: Arc<dyn HttpTransport>) -> Arc<dyn CardRepository> {
    let remote = RemoteCardRepository::new(transport, &config.explore.remote_url);
    let local = LocalCardRepository::new(
        Arc::new(DirectoryBundle::new(config.resources.root.clone())),
        &config.explore.local_resource_name,
    );
    Arc::new(CompositeCardRepository::new(Arc::new(remote), Arc::new(local)))
}
