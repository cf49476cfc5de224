use crate::normalize::Normalizer;
use crate::vectorize::term_frequencies;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single provider hit as received at the transport boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawResult {
    pub rank: u32,
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub rank: u32,
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub tokens: Vec<String>,
    pub term_vector: HashMap<String, u32>,
    pub jaccard_score: f64,
    pub cosine_score: f64,
}

impl SearchResult {
    /// Builds the derived fields in one place so `tokens` and `term_vector`
    /// always describe the same multiset.
    pub fn from_raw(raw: RawResult, normalizer: &Normalizer) -> Self {
        let combined = format!("{} {}", raw.title, raw.snippet);
        let tokens = normalizer.normalize(&combined);
        let term_vector = term_frequencies(&tokens);

        Self {
            rank: raw.rank,
            title: raw.title,
            url: raw.url,
            snippet: raw.snippet,
            tokens,
            term_vector,
            jaccard_score: 0.0,
            cosine_score: 0.0,
        }
    }

    pub fn score_for(&self, metric: RankingMetric) -> f64 {
        match metric {
            RankingMetric::Jaccard => self.jaccard_score,
            RankingMetric::Cosine => self.cosine_score,
        }
    }
}

/// Aggregate token/vector view of the results the user marked relevant.
/// Built once per session, read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelevanceReference {
    pub raw_text: String,
    pub tokens: Vec<String>,
    pub vector: HashMap<String, u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RankingMetric {
    Jaccard,
    Cosine,
}

impl RankingMetric {
    /// Lenient parse of the user's sort choice. `None` means the choice was
    /// not recognized and the caller should keep provider order.
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "j" | "jaccard" | "jaccard coefficient" => Some(Self::Jaccard),
            "2" | "c" | "cosine" | "cosine similarity" => Some(Self::Cosine),
            _ => None,
        }
    }
}

/// Stages of one query session. Transitions only move forward; an
/// interrupted session restarts from `Idle`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStage {
    Idle,
    ResultsFetched,
    RelevanceMarked,
    ReferenceBuilt,
    Scored,
    Sorted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_parse_accepts_original_spellings() {
        for choice in ["1", "j", "Jaccard", "JACCARD COEFFICIENT"] {
            assert_eq!(RankingMetric::parse(choice), Some(RankingMetric::Jaccard));
        }
        for choice in ["2", "c", "cosine", "Cosine Similarity"] {
            assert_eq!(RankingMetric::parse(choice), Some(RankingMetric::Cosine));
        }
    }

    #[test]
    fn metric_parse_rejects_unknown_choice() {
        assert_eq!(RankingMetric::parse("euclidean"), None);
        assert_eq!(RankingMetric::parse(""), None);
    }

    #[test]
    fn derived_fields_agree_with_tokens() {
        let normalizer = Normalizer::new().expect("normalizer should build");
        let raw = RawResult {
            rank: 1,
            title: "Rust programming".to_string(),
            url: "https://example.com".to_string(),
            snippet: "Programming the Rust compiler".to_string(),
        };

        let result = SearchResult::from_raw(raw, &normalizer);
        let total: u32 = result.term_vector.values().sum();
        assert_eq!(total as usize, result.tokens.len());
        for token in &result.tokens {
            assert!(result.term_vector[token] >= 1);
        }
        assert_eq!(result.jaccard_score, 0.0);
        assert_eq!(result.cosine_score, 0.0);
    }
}
