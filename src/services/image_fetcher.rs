use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `2 * (width + height)`.
    pub fn perimeter(&self) -> u64 {
        2 * (u64::from(self.width) + u64::from(self.height))
    }
}

/// Retrieves an image by URL and reports its decoded dimensions.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch_dimensions(&self, url: &str) -> Result<ImageDimensions, FetchError>;
}

/// Fetches images over HTTP and decodes them with the `image` crate.
pub struct HttpImageFetcher {
    http: Client,
}

impl HttpImageFetcher {
    /// Build a fetcher. With no timeout, a request may block for as long as
    /// the remote keeps the connection open.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_dimensions(&self, url: &str) -> Result<ImageDimensions, FetchError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let bytes = response.bytes().await?;

        // Full decode on the blocking pool; truncated payloads must fail.
        let dimensions = tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes)
                .map(|img| ImageDimensions::new(img.width(), img.height()))
        })
        .await??;

        Ok(dimensions)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to download image: {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
