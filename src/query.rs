//! Query normalization
//!
//! Turns a raw utterance plus the host's media-type hint into a base
//! relevance score and an ordered, deduplicated set of query strings to
//! run against the directory.

use crate::models::MediaType;
use crate::vocab::{self, Vocabulary};

/// Base-score contribution of the radio-keyword / media-type prior
pub const RADIO_PRIOR_SCORE: i32 = 30;

/// Base-score contribution of an explicit trigger term match
pub const TRIGGER_SCORE: i32 = 50;

/// The normalized form of one utterance: a scoring prior plus the query
/// variants to try, in precedence order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Base relevance score applied to every candidate from this plan
    pub base_score: i32,
    /// Ordered, deduplicated query strings
    pub queries: Vec<String>,
}

impl QueryPlan {
    /// Build a plan from an utterance and the host's media-type hint
    ///
    /// - +30 if the hint is RADIO or the phrase contains a registered
    ///   radio keyword, −30 otherwise (strong prior either way).
    /// - +50 per matched trigger term; every matched trigger is stripped
    ///   before the query set is built (explicit invocation beats
    ///   inference, and no trigger term ever reaches the directory).
    /// - The query set holds the fully stripped phrase, plus a variant
    ///   with the literal substring "radio" removed when it still
    ///   appears. First-seen order, no duplicates.
    ///
    /// An empty phrase (before or after stripping) is a valid query.
    pub fn build(phrase: &str, media_type: MediaType, vocab: &Vocabulary) -> Self {
        let mut base_score = 0;

        if media_type == MediaType::Radio || vocab.matches_radio(phrase) {
            base_score += RADIO_PRIOR_SCORE;
        } else {
            base_score -= RADIO_PRIOR_SCORE;
        }

        let mut phrase: String = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut queries: Vec<String> = Vec::new();

        for trigger in vocab.triggers() {
            if vocab::contains_term(&phrase, trigger) {
                base_score += TRIGGER_SCORE;
                phrase = vocab::remove_term(&phrase, trigger);
            }
        }
        queries.push(phrase.clone());

        if vocab::contains_substring_ci(&phrase, "radio") {
            let without_radio = vocab::remove_substring_ci(&phrase, "radio");
            if !queries.contains(&without_radio) {
                queries.push(without_radio);
            }
        }

        Self {
            base_score,
            queries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_with_trigger() -> Vocabulary {
        let mut vocab = Vocabulary::for_locale("en-us");
        vocab.register_trigger("radio browser");
        vocab
    }

    #[test]
    fn test_radio_hint_scores_plus_30() {
        let vocab = Vocabulary::for_locale("en-us");
        let plan = QueryPlan::build("NPR", MediaType::Radio, &vocab);
        assert_eq!(plan.base_score, 30);
        assert_eq!(plan.queries, vec!["NPR".to_string()]);
    }

    #[test]
    fn test_keyword_scores_plus_30_without_hint() {
        let vocab = Vocabulary::for_locale("en-us");
        let plan = QueryPlan::build("play radio NPR", MediaType::Generic, &vocab);
        assert_eq!(plan.base_score, 30);
    }

    #[test]
    fn test_non_radio_phrase_scores_minus_30() {
        let vocab = Vocabulary::for_locale("en-us");
        let plan = QueryPlan::build("play some jazz", MediaType::Music, &vocab);
        assert_eq!(plan.base_score, -30);
    }

    #[test]
    fn test_trigger_adds_50_and_is_stripped_everywhere() {
        let vocab = vocab_with_trigger();
        let plan = QueryPlan::build("radio browser jazz", MediaType::Radio, &vocab);
        assert_eq!(plan.base_score, 30 + 50);
        for query in &plan.queries {
            assert!(
                !vocab::contains_term(query, "radio browser"),
                "trigger leaked into query '{}'",
                query
            );
        }
        assert!(plan.queries.contains(&"jazz".to_string()));
    }

    #[test]
    fn test_radio_npr_scenario() {
        // phrase = "radio NPR", media_type = RADIO
        let vocab = Vocabulary::for_locale("en-us");
        let plan = QueryPlan::build("radio NPR", MediaType::Radio, &vocab);
        assert_eq!(plan.base_score, 30);
        assert_eq!(
            plan.queries,
            vec!["radio NPR".to_string(), "NPR".to_string()]
        );
    }

    #[test]
    fn test_queries_deduplicated_in_order() {
        let mut vocab = Vocabulary::for_locale("en-us");
        vocab.register_trigger("radio browser");
        vocab.register_trigger("internet radio");
        // Neither trigger matches: only the phrase and its
        // "radio"-stripped variant make the set.
        let plan = QueryPlan::build("radio NPR", MediaType::Radio, &vocab);
        assert_eq!(
            plan.queries,
            vec!["radio NPR".to_string(), "NPR".to_string()]
        );
    }

    #[test]
    fn test_later_trigger_never_leaks_into_queries() {
        let mut vocab = Vocabulary::for_locale("en-us");
        vocab.register_trigger("radio browser");
        vocab.register_trigger("internet radio");
        // Only the second trigger matches; it must be gone from every
        // query variant, not just the ones built after its turn.
        let plan = QueryPlan::build("internet radio jazz", MediaType::Radio, &vocab);
        assert_eq!(plan.base_score, 80);
        for query in &plan.queries {
            assert!(
                !vocab::contains_term(query, "internet radio"),
                "trigger leaked into query '{}'",
                query
            );
        }
        assert_eq!(plan.queries, vec!["jazz".to_string()]);
    }

    #[test]
    fn test_empty_phrase_is_valid() {
        let vocab = vocab_with_trigger();
        let plan = QueryPlan::build("radio browser", MediaType::Radio, &vocab);
        assert_eq!(plan.base_score, 80);
        assert_eq!(plan.queries, vec![String::new()]);
    }

    #[test]
    fn test_localized_keyword() {
        let vocab = Vocabulary::for_locale("ru-ru");
        let plan = QueryPlan::build("включи радио маяк", MediaType::Generic, &vocab);
        assert_eq!(plan.base_score, 30);
        // Cyrillic "радио" is not the literal substring "radio"
        assert_eq!(plan.queries.len(), 1);
    }
}
