//! Legacy `.doc` uploads. Many are OOXML files with the old extension, so the
//! DOCX loader is tried first and raw decoding is the fallback.

use bytes::Bytes;
use tracing::debug;

use crate::parsing::errors::LoaderError;
use crate::parsing::loaders::docx::DocxLoader;

/// Minimum trimmed length of the text from either path.
pub const MIN_DOC_CHARS: usize = 10;

pub const DOC_UNREADABLE_MESSAGE: &str = "Please save it as .docx or PDF and try again.";

/// Which path produced the text of a `.doc` upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSource {
    Ooxml,
    RawBytes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegacyDocText {
    pub fragments: Vec<String>,
    pub source: DocSource,
}

pub async fn load_legacy_doc(
    docx: &dyn DocxLoader,
    bytes: Bytes,
) -> Result<LegacyDocText, LoaderError> {
    match docx.load(bytes.clone()).await {
        Ok(fragments) if has_enough_text(&fragments.concat()) => {
            return Ok(LegacyDocText {
                fragments,
                source: DocSource::Ooxml,
            })
        }
        Ok(_) => debug!("DOC opened as OOXML but holds too little text, trying raw decode"),
        Err(e) => debug!("DOC is not OOXML ({e}), falling back to raw decode"),
    }

    let text = decode_raw_text(&bytes);
    if !has_enough_text(&text) {
        return Err(LoaderError::Extraction(DOC_UNREADABLE_MESSAGE.to_string()));
    }

    Ok(LegacyDocText {
        fragments: vec![text],
        source: DocSource::RawBytes,
    })
}

fn has_enough_text(text: &str) -> bool {
    text.trim().chars().count() >= MIN_DOC_CHARS
}

/// Lossy UTF-8 decode that keeps only printable text.
///
/// Control bytes, replacement characters and whitespace runs all collapse to a
/// single space, so binary Word structures do not leak into the result.
pub fn decode_raw_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(decoded.len());
    let mut gap = false;
    for c in decoded.chars() {
        if c.is_alphanumeric() || c.is_ascii_punctuation() {
            if gap && !out.is_empty() {
                out.push(' ');
            }
            gap = false;
            out.push(c);
        } else {
            gap = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::parsing::fixtures;
    use crate::parsing::loaders::docx::DocxRsLoader;

    /// Opens every input as OOXML and returns the same fragments.
    struct FixedDocx(&'static str);

    #[async_trait]
    impl DocxLoader for FixedDocx {
        async fn load(&self, _bytes: Bytes) -> Result<Vec<String>, LoaderError> {
            Ok(vec![self.0.to_string()])
        }
    }

    struct FailingDocx {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocxLoader for FailingDocx {
        async fn load(&self, _bytes: Bytes) -> Result<Vec<String>, LoaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(LoaderError::Extraction("not a zip archive".to_string()))
        }
    }

    fn failing() -> FailingDocx {
        FailingDocx {
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_decode_strips_control_and_invalid_bytes() {
        let bytes = b"\xd0\xcf\x11\xe0Jane\x00\x00Doe\r\n\tEngineer\xff\xfe";
        assert_eq!(decode_raw_text(bytes), "Jane Doe Engineer");
    }

    #[tokio::test]
    async fn test_falls_back_to_raw_decode() {
        let docx = failing();
        let bytes = Bytes::from_static(b"Resume of Jane Doe, backend engineer.");
        let doc = load_legacy_doc(&docx, bytes).await.unwrap();

        assert_eq!(docx.calls.load(Ordering::SeqCst), 1);
        assert_eq!(doc.source, DocSource::RawBytes);
        assert_eq!(doc.fragments, vec!["Resume of Jane Doe, backend engineer.".to_string()]);
    }

    #[tokio::test]
    async fn test_binary_noise_is_rejected() {
        let docx = failing();
        let bytes = Bytes::from_static(b"\x00\x01\x02ab\xff\xfe\x03cd\x00");
        let err = load_legacy_doc(&docx, bytes).await.unwrap_err();
        assert_eq!(err.to_string(), DOC_UNREADABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_short_ooxml_text_falls_through_to_raw_decode() {
        let bytes = Bytes::from_static(b"Resume of Jane Doe, backend engineer.");
        let doc = load_legacy_doc(&FixedDocx("Hi"), bytes).await.unwrap();
        assert_eq!(doc.source, DocSource::RawBytes);
    }

    #[tokio::test]
    async fn test_short_ooxml_text_with_unreadable_bytes_is_rejected() {
        let bytes = Bytes::from_static(b"\x00\x01ab\xff\x02");
        let err = load_legacy_doc(&FixedDocx("Hi"), bytes).await.unwrap_err();
        assert_eq!(err.to_string(), DOC_UNREADABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_real_docx_with_too_little_text_is_not_accepted_as_ooxml() {
        let bytes = Bytes::from(fixtures::docx(&["Hi"]));
        let result = load_legacy_doc(&DocxRsLoader, bytes).await;
        assert!(!matches!(
            result,
            Ok(LegacyDocText {
                source: DocSource::Ooxml,
                ..
            })
        ));
    }
}
