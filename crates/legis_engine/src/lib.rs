//! Legis engine: fetching, decoding, page traversal and record output.
mod context;
mod decode;
mod engine;
mod fetch;
mod filename;
mod jurisdictions;
mod page;
mod persist;
mod retry;
mod sink;
mod types;

pub use context::ScrapeContext;
pub use decode::{decode_html, DecodeError, DecodedHtml};
pub use engine::{RunSummary, ScrapeRunner};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::deterministic_filename;
pub use jurisdictions::{
    available_jurisdictions, scraper_for, CaliforniaBillScraper, IllinoisEventScraper, Scraper,
};
pub use page::Page;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use retry::{fetch_with_backoff, OnExhaustion, RetryPolicy};
pub use sink::{JsonDirSink, MemorySink, RecordSink, SinkError};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ScrapeError, ScrapeReport};
