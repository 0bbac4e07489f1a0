//! Name-similarity scoring
//!
//! A candidate's final confidence is the normalizer's base score plus a
//! scaled Damerau–Levenshtein similarity between the station name and
//! the query, clamped to at most 100. No lower clamp is applied.

use strsim::normalized_damerau_levenshtein;

/// Maximum match confidence reported to the host
pub const MAX_CONFIDENCE: i32 = 100;

/// Default scale applied to the similarity before adding the base score
pub const DEFAULT_SIMILARITY_SCALE: u32 = 100;

/// Normalized similarity between a station name and the query, in [0.0, 1.0]
///
/// 1.0 means equal strings; the query is treated as the reference.
pub fn name_similarity(name: &str, query: &str) -> f64 {
    normalized_damerau_levenshtein(name, query)
}

/// Final match confidence for one candidate
///
/// `scale` maps the similarity into score points (100 gives the full
/// 0–100 range, 80 the historic reduced range). The result is clamped to
/// [`MAX_CONFIDENCE`]; negative values are preserved.
pub fn match_confidence(base_score: i32, name: &str, query: &str, scale: u32) -> i32 {
    let scaled = (name_similarity(name, query) * scale as f64) as i32;
    (base_score + scaled).min(MAX_CONFIDENCE)
}
