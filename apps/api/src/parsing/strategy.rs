//! PDF fallback controller.
//!
//! Extraction settings that work for one PDF producer can yield nothing for
//! another, so PDFs are tried against an ordered table of strategies. Each
//! attempt is time-boxed; a failed, timed-out or empty attempt moves on to the
//! next entry and the first attempt with usable text wins.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::parsing::errors::{LoaderError, ParseError};
use crate::parsing::loaders::pdf::{PdfExtraction, PdfLoadOptions, PdfLoader};
use crate::parsing::models::FileType;

pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);
/// Concatenated text must be longer than this many characters to count as a success.
pub const MIN_PDF_TEXT_CHARS: usize = 10;

pub const PDF_EXHAUSTED_MESSAGE: &str = "Unable to extract text from this PDF. The file may be corrupted, password-protected, or contain only scanned images (OCR is not supported).";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Default,
    NoPageSplit,
    EmptySeparator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStrategy {
    pub kind: StrategyKind,
    pub options: PdfLoadOptions,
}

/// Tried in order.
pub const PDF_STRATEGIES: [ParseStrategy; 3] = [
    ParseStrategy {
        kind: StrategyKind::Default,
        options: PdfLoadOptions {
            split_pages: true,
            separator: None,
        },
    },
    ParseStrategy {
        kind: StrategyKind::NoPageSplit,
        options: PdfLoadOptions {
            split_pages: false,
            separator: None,
        },
    },
    ParseStrategy {
        kind: StrategyKind::EmptySeparator,
        options: PdfLoadOptions {
            split_pages: true,
            separator: Some(""),
        },
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct PdfOutcome {
    pub extraction: PdfExtraction,
    pub strategy: StrategyKind,
}

/// Runs `attempt`, giving up after `limit`. The abandoned future is dropped;
/// work it handed to a blocking thread carries on in the background.
pub async fn attempt_with_timeout<T, F>(limit: Duration, attempt: F) -> Result<T, LoaderError>
where
    F: Future<Output = Result<T, LoaderError>>,
{
    match tokio::time::timeout(limit, attempt).await {
        Ok(result) => result,
        Err(_) => Err(LoaderError::Timeout(limit)),
    }
}

pub fn is_usable(extraction: &PdfExtraction) -> bool {
    !extraction.fragments.is_empty()
        && extraction.fragments.concat().trim().chars().count() > MIN_PDF_TEXT_CHARS
}

/// Walks [`PDF_STRATEGIES`] until one yields usable text.
pub async fn extract_with_fallback(
    loader: &dyn PdfLoader,
    bytes: &Bytes,
    attempt_timeout: Duration,
) -> Result<PdfOutcome, ParseError> {
    for strategy in &PDF_STRATEGIES {
        debug!(strategy = ?strategy.kind, "Attempting PDF extraction");

        match attempt_with_timeout(attempt_timeout, loader.load(bytes.clone(), strategy.options))
            .await
        {
            Ok(extraction) if is_usable(&extraction) => {
                info!(
                    strategy = ?strategy.kind,
                    fragments = extraction.fragments.len(),
                    "PDF extraction succeeded"
                );
                return Ok(PdfOutcome {
                    extraction,
                    strategy: strategy.kind,
                });
            }
            Ok(extraction) => warn!(
                strategy = ?strategy.kind,
                fragments = extraction.fragments.len(),
                "PDF strategy produced no usable text"
            ),
            Err(e) => warn!(strategy = ?strategy.kind, "PDF strategy failed: {e}"),
        }
    }

    Err(ParseError::format(FileType::Pdf, PDF_EXHAUSTED_MESSAGE))
}
