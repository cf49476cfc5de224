use std::collections::HashMap;

/// Counts occurrences of each distinct token. Keys are unique, counts are
/// positive, and input order does not affect the output.
pub fn term_frequencies(tokens: &[String]) -> HashMap<String, u32> {
    let mut vector = HashMap::new();
    for token in tokens {
        *vector.entry(token.clone()).or_insert(0) += 1;
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::term_frequencies;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| (*word).to_string()).collect()
    }

    #[test]
    fn counts_token_multiplicity() {
        let vector = term_frequencies(&tokens(&["cat", "dog", "cat"]));
        assert_eq!(vector.len(), 2);
        assert_eq!(vector["cat"], 2);
        assert_eq!(vector["dog"], 1);
    }

    #[test]
    fn order_does_not_matter() {
        let forward = term_frequencies(&tokens(&["a", "b", "a"]));
        let backward = term_frequencies(&tokens(&["a", "a", "b"]));
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_sequence_yields_empty_vector() {
        assert!(term_frequencies(&[]).is_empty());
    }
}
