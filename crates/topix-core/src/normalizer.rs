//! Normalizer: the single definition of label and query normalization.
//!
//! Normalization is case-folding plus whitespace trimming. It is not
//! tokenization: matching stays substring containment over the whole label.

/// Normalize a label or a query term for matching.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
