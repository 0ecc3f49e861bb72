use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

use super::traits::ListingSource;
use super::types::{PageLocation, DEFAULT_LISTING_SELECTOR};

/// Offers page, read from disk or over HTTP, cut into one raw block per listing element
pub struct HtmlPageSource {
    client: Client,
    location: PageLocation,
    selector: String,
}

impl HtmlPageSource {
    /// Source using the default listing selector
    pub fn new(location: PageLocation) -> Result<Self> {
        Self::with_selector(location, DEFAULT_LISTING_SELECTOR)
    }

    pub fn with_selector(location: PageLocation, selector: &str) -> Result<Self> {
        parse_selector(selector)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            location,
            selector: selector.to_string(),
        })
    }

    async fn load_page(&self) -> Result<String> {
        match &self.location {
            PageLocation::File(path) => {
                debug!("Reading offers page {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))
            }
            PageLocation::Url(url) => {
                debug!("Fetching URL: {}", url);

                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .context("Failed to fetch offers page")?;

                if !response.status().is_success() {
                    warn!("Offers page returned status: {}", response.status());
                    anyhow::bail!("Failed to fetch offers page: {}", response.status());
                }

                response.text().await.context("Failed to read response body")
            }
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|err| anyhow!("Invalid CSS selector {selector:?}: {err:?}"))
}

/// Visible text of every element matching `selector`.
///
/// Each text node is trimmed; empty nodes are dropped and the rest joined by newlines.
pub fn extract_blocks(html: &str, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);

    let blocks = document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|block| !block.is_empty())
        .collect();

    Ok(blocks)
}

#[async_trait]
impl ListingSource for HtmlPageSource {
    async fn fetch_blocks(&self) -> Result<Vec<String>> {
        let html = self.load_page().await?;
        debug!("Loaded {} bytes of HTML", html.len());

        let blocks = extract_blocks(&html, &self.selector)?;
        if blocks.is_empty() {
            warn!("No listings matched selector {}", self.selector);
        } else {
            info!("Found {} listings on offers page", blocks.len());
        }
        Ok(blocks)
    }

    fn source_name(&self) -> &'static str {
        "WBM offers page"
    }
}
