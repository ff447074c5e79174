//! Text resource fetching
//!
//! Place datasets and translation tables are addressed by a location string
//! that is either an `http(s)://` URL or a local file path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;

/// Something that can turn a location into its text content.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, location: &str) -> Result<String>;
}

/// Fetches URLs over HTTP and everything else from the filesystem.
pub struct ResourceFetcher {
    client: Client,
}

impl ResourceFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("shackbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn is_url(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }
}

#[async_trait]
impl TextFetcher for ResourceFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        if Self::is_url(location) {
            tracing::debug!("GET {}", location);
            let response = self
                .client
                .get(location)
                .send()
                .await
                .with_context(|| format!("Failed to GET {}", location))?;

            if !response.status().is_success() {
                anyhow::bail!("HTTP error {} for {}", response.status(), location);
            }

            response
                .text()
                .await
                .with_context(|| format!("Failed to read response body from {}", location))
        } else {
            tracing::debug!("Reading {}", location);
            tokio::fs::read_to_string(location)
                .await
                .with_context(|| format!("Failed to read file: {}", location))
        }
    }
}

/// Serves fixed content from memory; unknown locations fail like a missing file.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    resources: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.resources.insert(location.into(), content.into());
        self
    }
}

#[async_trait]
impl TextFetcher for StaticFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        self.resources
            .get(location)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Resource not found: {}", location))
    }
}
