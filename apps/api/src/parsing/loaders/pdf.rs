use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::parsing::errors::LoaderError;
use crate::parsing::models::FileType;
use crate::parsing::temp_upload::TempUpload;

/// Knobs one PDF extraction attempt runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfLoadOptions {
    /// One fragment per page when true, a single fragment for the whole file otherwise.
    pub split_pages: bool,
    /// Joins the text items within each line. `None` keeps the library's own layout.
    pub separator: Option<&'static str>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfExtraction {
    pub fragments: Vec<String>,
    pub pages: Option<usize>,
}

/// Extracts text fragments from PDF bytes.
///
/// Carried by `DocumentParser` as `Arc<dyn PdfLoader>` so the fallback
/// controller can be driven by scripted loaders in tests.
#[async_trait]
pub trait PdfLoader: Send + Sync {
    async fn load(&self, bytes: Bytes, options: PdfLoadOptions)
        -> Result<PdfExtraction, LoaderError>;
}

/// `pdf-extract` backed loader. Extraction is CPU-bound and path-based, so
/// each call spills the upload into its own temp directory on a blocking thread.
pub struct PdfExtractLoader;

#[async_trait]
impl PdfLoader for PdfExtractLoader {
    async fn load(
        &self,
        bytes: Bytes,
        options: PdfLoadOptions,
    ) -> Result<PdfExtraction, LoaderError> {
        // If the caller stops waiting (attempt timeout) this task still runs to
        // completion and removes its temp directory.
        tokio::task::spawn_blocking(move || load_blocking(&bytes, options))
            .await
            .map_err(|e| LoaderError::Task(format!("PDF extraction panicked or was cancelled: {e}")))?
    }
}

fn load_blocking(bytes: &[u8], options: PdfLoadOptions) -> Result<PdfExtraction, LoaderError> {
    with_spilled_upload(bytes, |path| extract_from_path(path, options))
}

/// Writes `bytes` into a fresh temp directory, runs `extract` on the file and
/// removes the directory again whatever the outcome.
fn with_spilled_upload<T>(
    bytes: &[u8],
    extract: impl FnOnce(&Path) -> Result<T, LoaderError>,
) -> Result<T, LoaderError> {
    let file_name = format!("upload.{}", FileType::Pdf.extension());
    let upload = TempUpload::create(bytes, &file_name)?;
    let result = extract(upload.path());
    upload.cleanup();
    result
}

fn extract_from_path(path: &Path, options: PdfLoadOptions) -> Result<PdfExtraction, LoaderError> {
    if options.split_pages {
        let pages = pdf_extract::extract_text_by_pages(path)
            .map_err(|e| LoaderError::Extraction(format!("{e:?}")))?;
        let page_count = pages.len();
        let fragments = pages
            .iter()
            .map(|page| join_items(page, options.separator))
            .collect();
        Ok(PdfExtraction {
            fragments,
            pages: Some(page_count),
        })
    } else {
        let text = pdf_extract::extract_text(path)
            .map_err(|e| LoaderError::Extraction(format!("{e:?}")))?;
        Ok(PdfExtraction {
            fragments: vec![join_items(&text, options.separator)],
            pages: count_pages(path),
        })
    }
}

/// Page count from the document's page tree, for attempts that do not split pages.
fn count_pages(path: &Path) -> Option<usize> {
    match lopdf::Document::load(path) {
        Ok(doc) => Some(doc.get_pages().len()),
        Err(e) => {
            debug!("Could not read PDF page tree: {e}");
            None
        }
    }
}

/// `pdf-extract` pads separately placed text items on one line with a run of
/// spaces; a single space is an ordinary word gap.
static ITEM_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Re-joins the text items of every non-blank line with `separator`.
///
/// Lines stay on their own line. A separator with no visible characters
/// still leaves one space, so words from neighbouring items never fuse.
pub fn join_items(text: &str, separator: Option<&str>) -> String {
    let Some(sep) = separator else {
        return text.to_string();
    };
    let sep = if sep.trim().is_empty() { " " } else { sep };
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| ITEM_GAP.split(line).collect::<Vec<_>>().join(sep))
        .collect::<Vec<_>>()
        .join("\n")
}
