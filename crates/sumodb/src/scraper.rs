use crate::parser::{ParseError, parse_rikishi_page};
use crate::types::Rikishi;

use futures::future;
use reqwest::Client;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Invalid rikishi id {0}: ids start at 1")]
    InvalidId(u32),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_base_url(crate::BASE_URL)
    }

    /// Scraper against another SumoDB host, e.g. a mirror or a local mock.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn rikishi_url(&self, id: u32) -> String {
        format!("{}/Rikishi.aspx?r={}", self.base_url, id)
    }

    pub async fn fetch_rikishi(&self, id: u32) -> Result<Rikishi, ScraperError> {
        if id == 0 {
            return Err(ScraperError::InvalidId(id));
        }

        let url = self.rikishi_url(id);
        log::info!("Fetching rikishi({}) from {}", id, url);

        let html = self.get_html(&url).await?;
        let rikishi = parse_rikishi_page(&html, id)
            .inspect_err(|e| log::error!("Failed to parse rikishi({id}): {e}"))?;

        log::debug!("Parsed rikishi({}): {}", id, rikishi.shikona);
        Ok(rikishi)
    }

    /// Fetches every id concurrently. Results come back in the order of
    /// `ids`; a failed fetch does not affect the others.
    pub async fn fetch_rikishi_batch(
        &self,
        ids: &[u32],
    ) -> Vec<(u32, Result<Rikishi, ScraperError>)> {
        log::info!("Fetching {} rikishi profiles...", ids.len());

        let results = future::join_all(
            ids.iter()
                .map(|&id| async move { (id, self.fetch_rikishi(id).await) }),
        )
        .await;

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        if failed > 0 {
            log::warn!("{} of {} rikishi fetches failed", failed, ids.len());
        }

        results
    }

    async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()
            .inspect_err(|e| log::error!("HTTP status error: {e:?}"))?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}
