use std::collections::{HashMap, HashSet};

/// Jaccard coefficient: |A ∩ B| / (|A| + |B| − |A ∩ B|).
/// Two empty sets score 0.0 rather than dividing by zero.
pub fn jaccard(left: &HashSet<&str>, right: &HashSet<&str>) -> f64 {
    let intersection = left.intersection(right).count();
    let union = left.len() + right.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Term-frequency cosine similarity. The dot product runs over the key
/// intersection; the norms run over each full vector. A zero norm on either
/// side scores 0.0, never NaN or infinity.
pub fn cosine(left: &HashMap<String, u32>, right: &HashMap<String, u32>) -> f64 {
    let numerator: f64 = left
        .iter()
        .filter_map(|(term, count)| right.get(term).map(|other| f64::from(*count) * f64::from(*other)))
        .sum();

    let denominator = norm(left) * norm(right);
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

fn norm(vector: &HashMap<String, u32>) -> f64 {
    vector
        .values()
        .map(|count| f64::from(*count) * f64::from(*count))
        .sum::<f64>()
        .sqrt()
}
