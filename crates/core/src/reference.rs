use crate::models::{RelevanceReference, SearchResult};
use crate::normalize::Normalizer;
use crate::vectorize::term_frequencies;

/// Concatenates the selected results' titles and snippets in selection order
/// and derives the reference token stream and term vector from it. Zero
/// selections produce an empty reference, which is a valid terminal state:
/// every similarity against it scores 0.0.
pub fn build_reference(selected: &[&SearchResult], normalizer: &Normalizer) -> RelevanceReference {
    let raw_text = selected
        .iter()
        .map(|result| format!("{} {}", result.title, result.snippet))
        .collect::<Vec<_>>()
        .join(" ");

    let tokens = normalizer.normalize(&raw_text);
    let vector = term_frequencies(&tokens);

    RelevanceReference {
        raw_text,
        tokens,
        vector,
    }
}

#[cfg(test)]
mod tests {
    use super::build_reference;
    use crate::models::{RawResult, SearchResult};
    use crate::normalize::Normalizer;

    fn result(rank: u32, title: &str, snippet: &str, normalizer: &Normalizer) -> SearchResult {
        SearchResult::from_raw(
            RawResult {
                rank,
                title: title.to_string(),
                url: format!("https://example.com/{rank}"),
                snippet: snippet.to_string(),
            },
            normalizer,
        )
    }

    #[test]
    fn reference_aggregates_selected_text_in_order() {
        let normalizer = Normalizer::new().expect("normalizer should build");
        let first = result(1, "Cats", "about cats", &normalizer);
        let second = result(2, "Dogs", "about dogs", &normalizer);

        let reference = build_reference(&[&first, &second], &normalizer);
        assert_eq!(reference.raw_text, "Cats about cats Dogs about dogs");
        assert_eq!(reference.tokens, vec!["cat", "cat", "dog", "dog"]);
        assert_eq!(reference.vector["cat"], 2);
        assert_eq!(reference.vector["dog"], 2);
    }

    #[test]
    fn zero_selections_yield_an_empty_reference() {
        let normalizer = Normalizer::new().expect("normalizer should build");
        let reference = build_reference(&[], &normalizer);
        assert!(reference.raw_text.is_empty());
        assert!(reference.tokens.is_empty());
        assert!(reference.vector.is_empty());
    }
}
