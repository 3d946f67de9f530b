//! Token-order-invariant name similarity.
//!
//! Mentions coming out of the prediction process rarely match the registry
//! spelling exactly; the most common drift is name-order flips like
//! "Smith John" vs "John Smith". Scoring therefore happens on a normalized,
//! token-sorted form of both strings.

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use strsim::normalized_levenshtein;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a name for comparison
/// - Converts to lowercase
/// - Replaces punctuation with spaces
/// - Collapses runs of whitespace
pub fn normalize(s: &str) -> String {
    let lowered: String = s
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    WHITESPACE.replace_all(&lowered, " ").trim().to_string()
}

/// Canonical comparison key: normalized tokens sorted into a stable order,
/// so "Smith John" and "John Smith" produce the same key.
pub fn token_sort_key(s: &str) -> String {
    normalize(s).split_whitespace().sorted().join(" ")
}

/// Similarity between two names on a 0-100 scale.
///
/// Both inputs are reduced to their token-sort key and compared with
/// normalized Levenshtein distance. Pure and deterministic: equal keys score
/// 100, an empty side scores 0 against anything non-empty.
pub fn score(a: &str, b: &str) -> f64 {
    let key_a = token_sort_key(a);
    let key_b = token_sort_key(b);

    if key_a == key_b {
        return 100.0;
    }
    if key_a.is_empty() || key_b.is_empty() {
        return 0.0;
    }

    normalized_levenshtein(&key_a, &key_b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Lionel  Messi "), "lionel messi");
        assert_eq!(normalize("O'Neill, Shane"), "o neill shane");
        assert_eq!(normalize("KYLIAN MBAPPÉ"), "kylian mbappé");
    }

    #[test]
    fn test_token_sort_key_reorders() {
        assert_eq!(token_sort_key("Messi Lionel"), token_sort_key("Lionel Messi"));
        assert_eq!(token_sort_key("de Bruyne Kevin"), "bruyne de kevin");
    }

    #[test]
    fn test_token_order_invariance() {
        assert_eq!(score("John Smith", "Smith John"), score("John Smith", "John Smith"));
        assert_eq!(score("John Smith", "Smith John"), 100.0);
    }

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(score("Cristiano Ronaldo", "Cristiano Ronaldo"), 100.0);
    }

    #[test]
    fn test_empty_vs_non_empty_scores_zero() {
        assert_eq!(score("", "Lionel Messi"), 0.0);
        assert_eq!(score("???", "Lionel Messi"), 0.0);
    }

    #[test]
    fn test_near_miss_scores_high() {
        // One substitution across "john smith" / "jon smith"
        let s = score("Jon Smith", "John Smith");
        assert!(s > 85.0 && s < 100.0, "score was {}", s);
    }

    #[test]
    fn test_unrelated_names_score_low() {
        assert!(score("Lionel Messi", "Erling Haaland") < 40.0);
    }
}
