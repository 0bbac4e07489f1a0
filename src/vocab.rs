//! Trigger and keyword vocabulary for utterance classification
//!
//! The host registers, per locale, the native word for "radio" plus the
//! explicit trigger words that name this skill. [`Vocabulary`] holds both
//! sets and provides the word-boundary matching and stripping the query
//! normalizer relies on.

/// Native word for "radio" per supported locale
///
/// Registered with the host so utterances get classified as radio
/// requests before they reach the skill.
pub const KEYWORD_SAMPLES: &[(&str, &str)] = &[
    ("en-us", "radio"),
    ("es-es", "radio"),
    ("ca-es", "radio"),
    ("fr-fr", "radio"),
    ("it-it", "radio"),
    ("pt-pt", "rádio"),
    ("pt-br", "rádio"),
    ("de-de", "radio"),
    ("nl-nl", "radio"),
    ("pl-pl", "radio"),
    ("hu-hu", "radio"),
    ("cs-cz", "rádio"),
    ("da-dk", "radio"),
    ("sv-se", "radio"),
    ("sv-fi", "radiota"),
    ("ru-ru", "радио"),
];

/// Keyword and trigger vocabulary for one skill instance
///
/// Keywords are the locale-appropriate words for "radio" (inference that
/// the request is about radio). Triggers are the words that explicitly
/// name this skill and therefore beat inference when scoring.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    keywords: Vec<String>,
    triggers: Vec<String>,
}

impl Vocabulary {
    /// Vocabulary for a single locale
    ///
    /// Falls back to "radio" for locales missing from [`KEYWORD_SAMPLES`].
    pub fn for_locale(locale: &str) -> Self {
        let keyword = KEYWORD_SAMPLES
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(locale))
            .map(|(_, w)| *w)
            .unwrap_or("radio");
        Self {
            keywords: vec![keyword.to_string()],
            triggers: Vec::new(),
        }
    }

    /// Vocabulary covering every known locale keyword at once
    pub fn with_all_locales() -> Self {
        let mut vocab = Self::default();
        for (_, word) in KEYWORD_SAMPLES {
            vocab.register_keyword(*word);
        }
        vocab
    }

    /// Register an additional radio keyword
    pub fn register_keyword(&mut self, word: impl Into<String>) {
        let word = word.into();
        if !self.keywords.contains(&word) {
            self.keywords.push(word);
        }
    }

    /// Register an explicit trigger term (e.g. the skill's spoken name)
    pub fn register_trigger(&mut self, term: impl Into<String>) {
        let term = term.into();
        if !self.triggers.contains(&term) {
            self.triggers.push(term);
        }
    }

    /// Registered trigger terms, in registration order
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    /// Whether the phrase contains any registered radio keyword
    pub fn matches_radio(&self, phrase: &str) -> bool {
        self.keywords.iter().any(|kw| contains_term(phrase, kw))
    }
}

/// Check whether `term` occurs in `phrase` as whole words
///
/// Matching is case-insensitive and tolerant of punctuation stuck to
/// phrase words ("radio," matches "radio"). Multi-word terms match a
/// consecutive run of phrase words.
pub fn contains_term(phrase: &str, term: &str) -> bool {
    find_term_window(phrase, term).is_some()
}

/// Remove every whole-word occurrence of `term` from `phrase`
///
/// Remaining words are re-joined with single spaces, so whitespace is
/// collapsed as a side effect.
pub fn remove_term(phrase: &str, term: &str) -> String {
    let term_words = normalized_words(term);
    if term_words.is_empty() {
        return phrase.split_whitespace().collect::<Vec<_>>().join(" ");
    }

    let words: Vec<&str> = phrase.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        if window_matches(&words, i, &term_words) {
            i += term_words.len();
        } else {
            kept.push(words[i]);
            i += 1;
        }
    }
    kept.join(" ")
}

/// Remove every case-insensitive occurrence of an ASCII substring
///
/// Used for the literal "radio" stripping in the query normalizer, which
/// operates on substrings rather than word boundaries.
pub fn remove_substring_ci(phrase: &str, needle: &str) -> String {
    debug_assert!(needle.is_ascii());
    let mut out = String::with_capacity(phrase.len());
    let bytes = phrase.as_bytes();
    let nlen = needle.len();
    let mut i = 0;
    while i < bytes.len() {
        if i + nlen <= bytes.len()
            && phrase.is_char_boundary(i)
            && phrase.is_char_boundary(i + nlen)
            && phrase[i..i + nlen].eq_ignore_ascii_case(needle)
        {
            i += nlen;
        } else if let Some(ch) = phrase[i..].chars().next() {
            out.push(ch);
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether an ASCII substring occurs case-insensitively
pub fn contains_substring_ci(phrase: &str, needle: &str) -> bool {
    debug_assert!(needle.is_ascii());
    let nlen = needle.len();
    if nlen == 0 || phrase.len() < nlen {
        return false;
    }
    (0..=phrase.len() - nlen).any(|i| {
        phrase.is_char_boundary(i)
            && phrase.is_char_boundary(i + nlen)
            && phrase[i..i + nlen].eq_ignore_ascii_case(needle)
    })
}

fn find_term_window(phrase: &str, term: &str) -> Option<usize> {
    let term_words = normalized_words(term);
    if term_words.is_empty() {
        return None;
    }
    let words: Vec<&str> = phrase.split_whitespace().collect();
    (0..words.len()).find(|&i| window_matches(&words, i, &term_words))
}

fn window_matches(words: &[&str], start: usize, term_words: &[String]) -> bool {
    if start + term_words.len() > words.len() {
        return false;
    }
    term_words
        .iter()
        .enumerate()
        .all(|(j, tw)| normalize_word(words[start + j]) == *tw)
}

fn normalized_words(s: &str) -> Vec<String> {
    s.split_whitespace().map(normalize_word).collect()
}

fn normalize_word(w: &str) -> String {
    w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_samples_cover_required_locales() {
        for locale in [
            "en-us", "es-es", "ca-es", "fr-fr", "it-it", "pt-pt", "pt-br", "de-de", "nl-nl",
            "pl-pl", "hu-hu", "cs-cz", "da-dk", "sv-se", "sv-fi", "ru-ru",
        ] {
            assert!(
                KEYWORD_SAMPLES.iter().any(|(l, _)| *l == locale),
                "missing locale {}",
                locale
            );
        }
    }

    #[test]
    fn test_contains_term_word_boundaries() {
        assert!(contains_term("play some radio now", "radio"));
        assert!(contains_term("Radio, please", "radio"));
        assert!(!contains_term("radiohead tickets", "radio"));
    }

    #[test]
    fn test_contains_term_multiword() {
        assert!(contains_term("open radio browser for jazz", "radio browser"));
        assert!(!contains_term("open radio for jazz browser", "radio browser"));
    }

    #[test]
    fn test_contains_term_non_ascii() {
        assert!(contains_term("включи радио маяк", "радио"));
        let vocab = Vocabulary::for_locale("pt-br");
        assert!(vocab.matches_radio("toca rádio gaúcha"));
    }

    #[test]
    fn test_remove_term_collapses_whitespace() {
        assert_eq!(
            remove_term("play  radio browser   jazz", "radio browser"),
            "play jazz"
        );
        assert_eq!(remove_term("radio", "radio"), "");
    }

    #[test]
    fn test_remove_substring_ci() {
        assert_eq!(remove_substring_ci("Radio NPR", "radio"), "NPR");
        assert_eq!(remove_substring_ci("npr radioradio", "radio"), "npr");
        assert_eq!(remove_substring_ci("радио jazz radio", "radio"), "радио jazz");
    }

    #[test]
    fn test_contains_substring_ci() {
        assert!(contains_substring_ci("Radiohead", "radio"));
        assert!(!contains_substring_ci("rad io", "radio"));
    }

    #[test]
    fn test_for_locale_fallback() {
        let vocab = Vocabulary::for_locale("xx-yy");
        assert!(vocab.matches_radio("some radio please"));
    }

    #[test]
    fn test_trigger_registration_dedups() {
        let mut vocab = Vocabulary::default();
        vocab.register_trigger("radio browser");
        vocab.register_trigger("radio browser");
        assert_eq!(vocab.triggers().len(), 1);
    }
}
