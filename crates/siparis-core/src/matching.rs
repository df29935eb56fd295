//! Exact-then-fuzzy product-code matching.

use crate::normalize::clean_product_code;

/// Finds the best candidate for `query` in `candidates`.
///
/// The first candidate that equals the query after canonicalization wins
/// immediately with similarity 1.0. Otherwise every candidate is scored with
/// a length-normalized edit-distance ratio over the canonical forms and the
/// best score at or above `threshold` is kept.
///
/// An empty (or canonically empty) query never matches: `(None, 0.0)`.
#[must_use]
pub fn find_best_match<'a, I>(query: &str, candidates: I, threshold: f64) -> (Option<&'a str>, f64)
where
    I: IntoIterator<Item = &'a str>,
{
    let query_clean = clean_product_code(query);
    if query_clean.is_empty() {
        return (None, 0.0);
    }

    let mut best: Option<&'a str> = None;
    let mut best_ratio = 0.0_f64;

    for candidate in candidates {
        let candidate_clean = clean_product_code(candidate);
        if candidate_clean == query_clean {
            return (Some(candidate), 1.0);
        }

        let ratio = strsim::normalized_levenshtein(&query_clean, &candidate_clean);
        if ratio > best_ratio && ratio >= threshold {
            best_ratio = ratio;
            best = Some(candidate);
        }
    }

    (best, best_ratio)
}
