//! Plausibility checks on extracted text, applied by the upload route after
//! a successful parse.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MIN_WORDS: usize = 10;
/// Share of non-whitespace characters allowed to be neither alphanumeric nor punctuation.
pub const MAX_NOISE_RATIO: f64 = 0.3;

static WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Alphabetic}+").unwrap());

/// Typographic punctuation common in resumes that `is_ascii_punctuation` misses.
const EXTRA_PUNCTUATION: &[char] = &['•', '·', '–', '—', '‘', '’', '“', '”', '…', '€', '£'];

#[derive(Debug, Error, PartialEq)]
pub enum ContentQualityError {
    #[error(
        "The document does not contain enough readable text ({words} words found, at least {min} required). Please upload a text-based document."
    )]
    TooShort { words: usize, min: usize },

    #[error(
        "The extracted text appears to be unreadable ({:.0}% non-text characters). The file may be scanned or use an unsupported encoding.",
        .ratio * 100.0
    )]
    Unreadable { ratio: f64 },
}

/// Number of alphabetic runs in `text`.
pub fn alphabetic_words(text: &str) -> usize {
    WORD_RUN.find_iter(text).count()
}

/// Fraction of non-whitespace characters that look like binary noise.
pub fn noise_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut noise = 0usize;
    for c in text.chars().filter(|c| !c.is_whitespace()) {
        total += 1;
        let readable =
            c.is_alphanumeric() || c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c);
        if !readable {
            noise += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    noise as f64 / total as f64
}

pub fn check_content(text: &str) -> Result<(), ContentQualityError> {
    let words = alphabetic_words(text);
    if words < MIN_WORDS {
        return Err(ContentQualityError::TooShort {
            words,
            min: MIN_WORDS,
        });
    }

    let ratio = noise_ratio(text);
    if ratio > MAX_NOISE_RATIO {
        return Err(ContentQualityError::Unreadable { ratio });
    }

    Ok(())
}
