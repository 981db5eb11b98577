//! Profile photo download
//!
//! Fetching is soft: every failure is logged and reported as "no data", so a
//! missing photo never costs the record.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::utils::constants::CHROME_USER_AGENT;

/// Anything that can turn a photo URL into bytes
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Bytes of the resource, or `None` on any failure
    async fn fetch(&self, url: &str) -> Option<Bytes>;
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("empty body")]
    Empty,
}

/// HTTP GET with a whole-request timeout and a size cap
#[derive(Debug, Clone)]
pub struct AssetFetcher {
    client: Client,
    max_bytes: usize,
}

impl AssetFetcher {
    /// Build a fetcher whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Fails when the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, max_bytes })
    }

    async fn download(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length()
            && len > self.max_bytes as u64
        {
            return Err(FetchError::TooLarge {
                limit: self.max_bytes,
            });
        }

        // Content-Length can be absent or wrong, so the cap is enforced on the stream too
        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            if body.len() + chunk.len() > self.max_bytes {
                return Err(FetchError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        if body.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(body.freeze())
    }
}

#[async_trait]
impl ImageSource for AssetFetcher {
    async fn fetch(&self, url: &str) -> Option<Bytes> {
        match self.download(url).await {
            Ok(bytes) => {
                debug!("Fetched {} bytes from {}", bytes.len(), url);
                Some(bytes)
            }
            Err(e) => {
                warn!("Photo fetch failed for {}: {}", url, e);
                None
            }
        }
    }
}
