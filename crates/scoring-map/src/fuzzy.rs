//! Token-order-insensitive similarity.

use rapidfuzz::fuzz;
use scoring_standards::normalize_key;

/// Normalizes `raw` and sorts its whitespace tokens.
pub fn token_sort_key(raw: &str) -> String {
    let normalized = normalize_key(raw);
    let mut tokens: Vec<&str> = normalized.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of two strings on a 0-100 scale, ignoring word order.
pub fn token_sort_ratio(left: &str, right: &str) -> f64 {
    sorted_ratio(&token_sort_key(left), &token_sort_key(right))
}

/// Same as [`token_sort_ratio`] for keys already passed through [`token_sort_key`].
pub(crate) fn sorted_ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    fuzz::ratio(left.chars(), right.chars()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_tokens() {
        assert_eq!(token_sort_key("Republic of the  Congo"), "congo of republic the");
        assert_eq!(token_sort_key("  "), "");
    }

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("Congo Republic", "Republic Congo"), 100.0);
    }

    #[test]
    fn typos_score_high_but_not_perfect() {
        let score = token_sort_ratio("Nigerya", "Nigeria");
        assert!(score >= 80.0 && score < 100.0, "{score}");
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_sort_ratio("", "Kenya"), 0.0);
    }
}
