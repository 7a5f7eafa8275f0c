use crate::parsing::errors::LoaderError;

const BOM: char = '\u{feff}';

/// Decodes a plain-text upload. Invalid UTF-8 sequences are replaced rather
/// than rejected; NUL bytes mean the file is not text at all.
pub fn load_text(bytes: &[u8]) -> Result<Vec<String>, LoaderError> {
    if bytes.contains(&0) {
        return Err(LoaderError::Extraction(
            "file contains binary data and is not plain text".to_string(),
        ));
    }
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded.strip_prefix(BOM).unwrap_or(&decoded);
    Ok(vec![text.to_string()])
}
