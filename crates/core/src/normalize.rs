use crate::error::NormalizeError;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Fixed English stop-word list (the NLTK set), compared after lower-casing.
fn stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| {
        [
            "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
            "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers",
            "herself", "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
            "what", "which", "who", "whom", "this", "that", "these", "those", "am", "is", "are",
            "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
            "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as", "until",
            "while", "of", "at", "by", "for", "with", "about", "against", "between", "into",
            "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
            "in", "out", "on", "off", "over", "under", "again", "further", "then", "once", "here",
            "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
            "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
            "than", "too", "very", "s", "t", "can", "will", "just", "don", "should", "now",
        ]
        .into_iter()
        .collect()
    })
}

/// Process-wide normalization configuration: punctuation pattern and Snowball
/// English stemmer, built once at startup and passed by reference.
pub struct Normalizer {
    punctuation: Regex,
    stemmer: Stemmer,
}

impl Normalizer {
    pub fn new() -> Result<Self, NormalizeError> {
        // ASCII punctuation plus the bullet and middle-dot marks providers
        // inject into snippets.
        let punctuation = Regex::new(r"[[:punct:]\u{2022}\u{00B7}]+")?;
        Ok(Self {
            punctuation,
            stemmer: Stemmer::create(Algorithm::English),
        })
    }

    /// Strips punctuation, tokenizes on Unicode word boundaries, drops stop
    /// words, and stems. Order and multiplicity are preserved for the
    /// vectorizer; empty input yields an empty sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = self.strip_punctuation(text);
        cleaned
            .unicode_words()
            .map(str::to_lowercase)
            .filter(|token| !stop_words().contains(token.as_str()))
            .map(|token| self.stemmer.stem(&token).into_owned())
            .collect()
    }

    pub fn strip_punctuation(&self, text: &str) -> String {
        self.punctuation.replace_all(text, "").into_owned()
    }
}

/// The single explicit decode at the ingestion boundary. All text past this
/// point is valid Unicode.
pub fn decode_text(bytes: Vec<u8>) -> Result<String, NormalizeError> {
    Ok(String::from_utf8(bytes)?)
}
