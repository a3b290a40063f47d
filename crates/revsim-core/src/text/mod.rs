//! Text processing utilities for tokenization
//!
//! Tokens are runs of two or more word characters in lower-cased text,
//! filtered against a fixed English stop-word list and optionally stemmed.

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::sync::OnceLock;

mod stop_words;

pub use stop_words::ENGLISH_STOP_WORDS;

static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Porter stemmer for English text
static STEMMER: OnceLock<Stemmer> = OnceLock::new();

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<&'static str> {
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::English))
}

fn get_token_pattern() -> &'static Regex {
    // Two or more word characters between word boundaries; single
    // characters never become terms.
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("static token pattern"))
}

/// Check whether a lower-cased token is in the built-in English stop-word list
pub fn is_stop_word(token: &str) -> bool {
    get_stop_words().contains(token)
}

/// Tokenizer settings applied identically to every document of a corpus
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stop_words: bool,
    extra_stop_words: HashSet<String>,
    stem: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Tokenizer {
            stop_words: true,
            extra_stop_words: HashSet::new(),
            stem: false,
        }
    }
}

impl Tokenizer {
    /// English stop words, no stemming
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the built-in English stop-word list
    pub fn with_stop_words(mut self, enabled: bool) -> Self {
        self.stop_words = enabled;
        self
    }

    /// Additional stop words, matched case-insensitively
    pub fn with_extra_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Apply English stemming after stop-word removal
    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    fn is_filtered(&self, token: &str) -> bool {
        (self.stop_words && is_stop_word(token)) || self.extra_stop_words.contains(token)
    }

    /// Split text into terms in document order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let tokens = get_token_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !self.is_filtered(t));

        if self.stem {
            let stemmer = get_stemmer();
            tokens.map(|t| stemmer.stem(t).into_owned()).collect()
        } else {
            tokens.map(str::to_string).collect()
        }
    }
}

/// Tokenize with the default settings (English stop words, no stemming)
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Great battery life!");
        assert_eq!(tokens, vec!["great", "battery", "life"]);
    }

    #[test]
    fn test_tokenize_removes_stop_words() {
        let tokens = tokenize("battery life is great");
        assert_eq!(tokens, vec!["battery", "life", "great"]);
    }

    #[test]
    fn test_tokenize_drops_single_characters() {
        let tokens = tokenize("a 5 star x product");
        assert_eq!(tokens, vec!["star", "product"]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("screen-quality,price;value");
        assert_eq!(tokens, vec!["screen", "quality", "price", "value"]);
    }

    #[test]
    fn test_tokenize_keeps_digits_and_underscores() {
        let tokens = tokenize("USB_C 128gb");
        assert_eq!(tokens, vec!["usb_c", "128gb"]);
    }

    #[test]
    fn test_tokenize_empty_after_stop_words() {
        assert_eq!(tokenize("the a an and or is"), Vec::<String>::new());
        assert_eq!(tokenize(""), Vec::<String>::new());
    }

    #[test]
    fn test_tokenize_keeps_repeated_terms() {
        let tokens = tokenize("good good value");
        assert_eq!(tokens, vec!["good", "good", "value"]);
    }

    #[test]
    fn test_stop_words_disabled() {
        let tokens = Tokenizer::new().with_stop_words(false).tokenize("it is great");
        assert_eq!(tokens, vec!["it", "is", "great"]);
    }

    #[test]
    fn test_extra_stop_words() {
        let tokens = Tokenizer::new()
            .with_extra_stop_words(["Product"])
            .tokenize("great product overall");
        assert_eq!(tokens, vec!["great", "overall"]);
    }

    #[test]
    fn test_stemming_enabled() {
        let tokens = Tokenizer::new()
            .with_stemming(true)
            .tokenize("batteries battery charging charged");
        assert_eq!(tokens, vec!["batteri", "batteri", "charg", "charg"]);
    }

    #[test]
    fn test_stop_word_list_size() {
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
        assert!(is_stop_word("the"));
        assert!(!is_stop_word("battery"));
    }
}
