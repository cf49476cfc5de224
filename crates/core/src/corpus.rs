use crate::error::CorpusError;
use crate::models::RelevanceReference;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CorpusFiles {
    pub raw_path: PathBuf,
    pub clean_path: PathBuf,
}

/// Writes the session's relevance corpus for offline inspection, keyed by the
/// query string: `<key>.txt` holds the raw concatenated text of the selected
/// results, `<key>-clean.txt` the normalized token stream. Written once per
/// session.
pub fn write_corpus(
    dir: &Path,
    query: &str,
    reference: &RelevanceReference,
) -> Result<CorpusFiles, CorpusError> {
    let key = corpus_key(query)?;
    let raw_path = dir.join(format!("{key}.txt"));
    let clean_path = dir.join(format!("{key}-clean.txt"));

    fs::write(&raw_path, &reference.raw_text)?;
    fs::write(&clean_path, reference.tokens.join(" "))?;

    Ok(CorpusFiles {
        raw_path,
        clean_path,
    })
}

/// Filesystem-safe key for a query: alphanumerics kept, runs of anything else
/// collapsed to a single underscore.
pub fn corpus_key(query: &str) -> Result<String, CorpusError> {
    let mut key = String::with_capacity(query.len());
    let mut last_was_separator = false;

    for character in query.trim().chars() {
        if character.is_alphanumeric() {
            key.push(character);
            last_was_separator = false;
        } else if !last_was_separator && !key.is_empty() {
            key.push('_');
            last_was_separator = true;
        }
    }

    while key.ends_with('_') {
        key.pop();
    }

    if key.is_empty() {
        return Err(CorpusError::EmptyQuery);
    }
    Ok(key)
}
