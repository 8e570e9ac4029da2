//! Feed loading.

use bytes::Bytes;
use geojson::FeatureCollection;
use thiserror::Error;

use super::RawFeatureCollection;

/// Error that can occur when trying to load a feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Could not connect to the remote server.
    #[error("network error loading {url}: {source}")]
    Network {
        /// Requested url.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("server returned status {status} for {url}")]
    Status {
        /// Requested url.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Body is not a valid feed document.
    #[error("failed to decode {url}: {reason}")]
    Decode {
        /// Requested url.
        url: String,
        /// Decoder message.
        reason: String,
    },
}

/// Source of raw feed bodies.
#[async_trait::async_trait]
pub trait FeedLoader: Send + Sync {
    /// Load the body of the document at the given url.
    async fn load(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// Loads feeds over HTTP.
///
/// No timeout is configured and failed requests are not retried.
#[derive(Debug, Clone)]
pub struct HttpFeedLoader {
    client: reqwest::Client,
}

impl HttpFeedLoader {
    /// Create a new instance with a default client.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|source| FetchError::Network {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }

    /// Create a new instance with the given client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl FeedLoader for HttpFeedLoader {
    async fn load(&self, url: &str) -> Result<Bytes, FetchError> {
        log::debug!("Downloading feed: {url}");

        let network = |source| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("Feed {url} answered with {status}");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(network)?;
        log::debug!("Downloaded {} bytes from: {url}", bytes.len());

        Ok(bytes)
    }
}

/// Load and decode the seismic events feed.
pub async fn fetch_events(
    loader: &dyn FeedLoader,
    url: &str,
) -> Result<RawFeatureCollection, FetchError> {
    let bytes = loader.load(url).await?;
    let collection =
        RawFeatureCollection::from_slice(&bytes).map_err(|err| FetchError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        })?;

    match collection.metadata.count {
        Some(count) => log::info!("Number of records: {count}"),
        None => log::info!("Number of records: {}", collection.features.len()),
    }

    Ok(collection)
}

/// Load and decode the plate boundaries feed.
///
/// The collection is kept as is; its features are drawn without any transformation.
pub async fn fetch_plate_boundaries(
    loader: &dyn FeedLoader,
    url: &str,
) -> Result<FeatureCollection, FetchError> {
    let bytes = loader.load(url).await?;
    let decode = |reason: String| FetchError::Decode {
        url: url.to_string(),
        reason,
    };

    let text = std::str::from_utf8(&bytes).map_err(|err| decode(err.to_string()))?;
    let collection = text
        .parse::<FeatureCollection>()
        .map_err(|err| decode(err.to_string()))?;

    log::info!(
        "Loaded {} plate boundary features",
        collection.features.len()
    );

    Ok(collection)
}
