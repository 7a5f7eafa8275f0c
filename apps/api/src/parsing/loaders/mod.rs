// Format-specific loaders. Each turns raw upload bytes into ordered text fragments.

pub mod docx;
pub mod legacy_doc;
pub mod pdf;
pub mod text;

pub use docx::{DocxLoader, DocxRsLoader};
pub use legacy_doc::{load_legacy_doc, DocSource, LegacyDocText};
pub use pdf::{PdfExtractLoader, PdfExtraction, PdfLoadOptions, PdfLoader};
pub use text::load_text;
