//! Raw source retrieval.
//!
//! Extractors never touch the network. [`Fetch`] hands them bytes, which
//! keeps offline fixture replay and the blocking HTTP client
//! interchangeable.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::error::Result;

/// Capability returning the raw bytes behind a source reference.
pub trait Fetch {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Builds a client with the configured user agent and timeout.
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!(url, "Fetching");
        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.bytes()?;
        debug!(url, bytes = body.len(), "Fetched");
        Ok(body.to_vec())
    }
}

/// Reads source references as local file paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        debug!(path, "Reading local source");
        Ok(std::fs::read(Path::new(path))?)
    }
}

/// Routes URLs to HTTP and everything else to the filesystem.
pub struct DefaultFetcher {
    http: HttpFetcher,
    files: FileFetcher,
}

impl DefaultFetcher {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        Ok(Self {
            http: HttpFetcher::new(config)?,
            files: FileFetcher,
        })
    }
}

impl Fetch for DefaultFetcher {
    fn fetch(&self, reference: &str) -> Result<Vec<u8>> {
        if is_url(reference) {
            self.http.fetch(reference)
        } else {
            self.files.fetch(reference)
        }
    }
}

pub fn is_url(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}
