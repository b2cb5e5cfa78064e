use std::sync::Arc;

use legis_core::TextNormalizer;
use scrape_logging::{scrape_debug, scrape_warn};

use crate::{decode_html, fetch_with_backoff, Fetcher, OnExhaustion, Page, RetryPolicy, ScrapeError};

/// What a scraper is given to do its work: fetching with retries, page
/// parsing and the shared text normalizer.
#[derive(Clone)]
pub struct ScrapeContext {
    fetcher: Arc<dyn Fetcher>,
    retry: RetryPolicy,
    normalizer: Arc<TextNormalizer>,
}

impl ScrapeContext {
    pub fn new(fetcher: Arc<dyn Fetcher>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            retry,
            normalizer: Arc::new(TextNormalizer::new()),
        }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Fetches and decodes `url` under the context's retry policy.
    ///
    /// `Ok(None)` means the fetch was abandoned under a warn policy.
    pub async fn get_html(&self, url: &str) -> Result<Option<String>, ScrapeError> {
        self.get_html_with(url, &self.retry).await
    }

    /// A page the run cannot do without: exhaustion is an error whatever the
    /// context's policy says.
    pub async fn get_required_html(&self, url: &str) -> Result<String, ScrapeError> {
        let policy = self.retry.clone().with_exhaustion(OnExhaustion::Fail);
        match self.get_html_with(url, &policy).await? {
            Some(html) => Ok(html),
            None => Err(ScrapeError::malformed(url, "a response")),
        }
    }

    pub async fn get_html_with(
        &self,
        url: &str,
        policy: &RetryPolicy,
    ) -> Result<Option<String>, ScrapeError> {
        scrape_debug!("GET {}", url);
        let fetcher = self.fetcher.as_ref();
        let attempt = move |timeout| fetcher.fetch(url, timeout);
        let output = match fetch_with_backoff(attempt, policy).await {
            Ok(Some(output)) => output,
            Ok(None) => {
                scrape_warn!("Skipping {} after repeated timeouts", url);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref())?;
        Ok(Some(decoded.html))
    }

    /// Convenience for scrapers that parse right away.
    pub async fn get_page(&self, url: &str) -> Result<Option<Page>, ScrapeError> {
        Ok(self.get_html(url).await?.map(|html| Page::parse(url, &html)))
    }
}
