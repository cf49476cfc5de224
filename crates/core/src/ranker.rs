use crate::models::{RankingMetric, RelevanceReference, SearchResult};
use crate::similarity::{cosine, jaccard};
use std::collections::HashSet;

/// Computes and stores both similarity scores for every result, whichever
/// metric later drives the ordering.
pub fn score_results(results: &mut [SearchResult], reference: &RelevanceReference) {
    let reference_set: HashSet<&str> = reference.tokens.iter().map(String::as_str).collect();

    for result in results {
        let token_set: HashSet<&str> = result.tokens.iter().map(String::as_str).collect();
        result.jaccard_score = jaccard(&token_set, &reference_set);
        result.cosine_score = cosine(&result.term_vector, &reference.vector);
    }
}

/// Stable descending sort by the chosen metric. Equal scores keep their
/// original relative order, so provider rank stays the implicit tiebreaker.
/// The output is a permutation of the input: nothing is dropped or deduped.
pub fn sort_by_metric(results: &mut [SearchResult], metric: RankingMetric) {
    results.sort_by(|left, right| {
        right
            .score_for(metric)
            .total_cmp(&left.score_for(metric))
    });
}

#[cfg(test)]
mod tests {
    use super::{score_results, sort_by_metric};
    use crate::models::{RankingMetric, RelevanceReference, SearchResult};
    use crate::vectorize::term_frequencies;
    use std::collections::HashSet;

    fn result_with_tokens(rank: u32, words: &[&str]) -> SearchResult {
        let tokens: Vec<String> = words.iter().map(|word| (*word).to_string()).collect();
        let term_vector = term_frequencies(&tokens);
        SearchResult {
            rank,
            title: format!("result {rank}"),
            url: format!("https://example.com/{rank}"),
            snippet: String::new(),
            tokens,
            term_vector,
            jaccard_score: 0.0,
            cosine_score: 0.0,
        }
    }

    fn reference_with_tokens(words: &[&str]) -> RelevanceReference {
        let tokens: Vec<String> = words.iter().map(|word| (*word).to_string()).collect();
        let vector = term_frequencies(&tokens);
        RelevanceReference {
            raw_text: words.join(" "),
            tokens,
            vector,
        }
    }

    #[test]
    fn cat_dog_fish_scenario_scores_and_orders_as_expected() {
        let mut results = vec![
            result_with_tokens(1, &["cat", "dog"]),
            result_with_tokens(2, &["cat"]),
            result_with_tokens(3, &["fish"]),
        ];
        let reference = reference_with_tokens(&["cat", "dog"]);

        score_results(&mut results, &reference);
        assert_eq!(results[0].jaccard_score, 1.0);
        assert_eq!(results[1].jaccard_score, 0.5);
        assert_eq!(results[2].jaccard_score, 0.0);

        sort_by_metric(&mut results, RankingMetric::Jaccard);
        let order: Vec<u32> = results.iter().map(|result| result.rank).collect();
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn both_scores_are_stored_regardless_of_sort_metric() {
        let mut results = vec![result_with_tokens(1, &["cat", "cat", "dog"])];
        let reference = reference_with_tokens(&["cat"]);

        score_results(&mut results, &reference);
        assert!(results[0].jaccard_score > 0.0);
        assert!(results[0].cosine_score > 0.0);
    }

    #[test]
    fn empty_reference_scores_zero_and_keeps_provider_order() {
        let mut results = vec![
            result_with_tokens(3, &["fish"]),
            result_with_tokens(1, &["cat"]),
            result_with_tokens(2, &["dog"]),
        ];
        let reference = reference_with_tokens(&[]);

        score_results(&mut results, &reference);
        for result in &results {
            assert_eq!(result.jaccard_score, 0.0);
            assert_eq!(result.cosine_score, 0.0);
        }

        sort_by_metric(&mut results, RankingMetric::Cosine);
        let order: Vec<u32> = results.iter().map(|result| result.rank).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn sort_is_a_permutation_of_the_input() {
        let mut results = vec![
            result_with_tokens(1, &["cat"]),
            result_with_tokens(2, &["dog"]),
            result_with_tokens(3, &["cat", "dog"]),
            result_with_tokens(4, &["fish"]),
        ];
        let reference = reference_with_tokens(&["dog"]);
        let before: HashSet<u32> = results.iter().map(|result| result.rank).collect();

        score_results(&mut results, &reference);
        sort_by_metric(&mut results, RankingMetric::Jaccard);

        let after: HashSet<u32> = results.iter().map(|result| result.rank).collect();
        assert_eq!(results.len(), 4);
        assert_eq!(before, after);
    }

    #[test]
    fn ties_preserve_original_relative_order() {
        let mut results = vec![
            result_with_tokens(7, &["cat"]),
            result_with_tokens(2, &["cat"]),
            result_with_tokens(5, &["dog"]),
        ];
        let reference = reference_with_tokens(&["cat"]);

        score_results(&mut results, &reference);
        sort_by_metric(&mut results, RankingMetric::Jaccard);

        let order: Vec<u32> = results.iter().map(|result| result.rank).collect();
        assert_eq!(order, vec![7, 2, 5]);
    }
}
