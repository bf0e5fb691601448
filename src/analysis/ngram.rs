use std::collections::HashSet;

/// Character n-grams of `text` (overlapping windows) as a set.
/// Text shorter than `n` characters has no n-grams.
pub fn ngram_set(text: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = text.chars().collect();
    if n == 0 || chars.len() < n {
        return HashSet::new();
    }

    chars.windows(n)
        .map(|window| window.iter().collect())
        .collect()
}

pub fn bigrams(text: &str) -> HashSet<String> {
    ngram_set(text, 2)
}

/// |A ∩ B| / |A ∪ B|, zero when either set is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}
