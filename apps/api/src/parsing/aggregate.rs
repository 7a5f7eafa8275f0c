use crate::parsing::models::{DocumentMetadata, FileType, ParsedDocument, UploadedFile};

pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Joins loader fragments into the final document. Pure; no I/O.
pub fn aggregate(
    fragments: &[String],
    pages: Option<usize>,
    file_type: FileType,
    file: &UploadedFile,
) -> ParsedDocument {
    let text = fragments.join(FRAGMENT_SEPARATOR).trim().to_string();
    let word_count = word_count(&text);

    ParsedDocument {
        text,
        metadata: DocumentMetadata {
            pages,
            word_count,
            file_type,
            file_name: file.name.clone(),
            file_size: file.size(),
        },
    }
}
