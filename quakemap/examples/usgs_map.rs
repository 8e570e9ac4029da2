//! Load the live USGS and plate boundary feeds and print the composed map.
//! Run with: cargo run --example usgs_map

use std::sync::Arc;

use quakemap::layer::OverlayKind;
use quakemap::{launch, FeedUrls, HttpFeedLoader, MapConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let loader = Arc::new(HttpFeedLoader::new()?);
    let session = launch(loader, FeedUrls::default(), MapConfig::default()).await?;
    log::info!(
        "Map ready with {} markers, plate boundaries {:?}",
        session.events().len(),
        session.overlay_status(OverlayKind::TectonicPlates)
    );

    session.wait_for_overlays().await;
    log::info!(
        "Plate boundaries: {:?}",
        session.overlay_status(OverlayKind::TectonicPlates)
    );

    if let Some(marker) = session.events().markers().first() {
        println!("{}\n", marker.popup.text());
    }
    println!("{}", session.snapshot().to_json()?);

    Ok(())
}
