use crate::parsing::errors::ValidationError;
use crate::parsing::models::{FileType, UploadedFile};

/// Upload ceiling applied when no override is configured.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Checks an upload against the size ceiling and the supported type set.
///
/// Order matters: size is checked first so an oversized upload is rejected
/// without looking at anything else. The type comes from the file name's
/// extension, falling back to the declared MIME type only when the name has
/// no extension (a trailing dot counts as none).
pub fn validate_file(file: &UploadedFile, max_size: usize) -> Result<FileType, ValidationError> {
    let size = file.size();
    if size > max_size {
        return Err(ValidationError::TooLarge {
            size,
            limit: max_size,
        });
    }
    if size == 0 {
        return Err(ValidationError::Empty);
    }

    match file.extension() {
        Some(ext) => FileType::from_extension(&ext)
            .ok_or(ValidationError::UnsupportedType { extension: ext }),
        None => file
            .content_type
            .as_deref()
            .and_then(FileType::from_mime)
            .ok_or_else(|| ValidationError::UnsupportedType {
                extension: file
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            }),
    }
}
