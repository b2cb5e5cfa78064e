use std::fmt;
use std::time::Duration;

use legis_core::BillIdError;
use thiserror::Error;

use crate::{DecodeError, SinkError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Timeouts are the only failures worth retrying with a longer deadline.
    pub fn is_timeout(&self) -> bool {
        self.kind == FailureKind::Timeout
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("gave up after {attempts} attempts, last timeout {last_timeout:?}")]
    FetchExhausted { attempts: u32, last_timeout: Duration },
    #[error("{url}: expected {missing}")]
    MalformedPage { url: String, missing: String },
    #[error("no records found where data was expected: {0}")]
    EmptyScrape(String),
    #[error(transparent)]
    BillId(#[from] BillIdError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),
    #[error("invalid selector {0:?}")]
    Selector(String),
    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl ScrapeError {
    pub(crate) fn malformed(url: &str, missing: impl Into<String>) -> Self {
        ScrapeError::MalformedPage {
            url: url.to_string(),
            missing: missing.into(),
        }
    }

    /// Failures confined to a single page; the scraper skips the page and moves on.
    pub fn is_page_local(&self) -> bool {
        matches!(
            self,
            ScrapeError::Fetch(_)
                | ScrapeError::FetchExhausted { .. }
                | ScrapeError::MalformedPage { .. }
                | ScrapeError::BillId(_)
                | ScrapeError::Decode(_)
        )
    }
}

/// What one scraper run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrapeReport {
    pub emitted: usize,
    pub skipped_pages: usize,
}

impl ScrapeReport {
    pub fn record_emitted(&mut self) {
        self.emitted += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_pages += 1;
    }
}
