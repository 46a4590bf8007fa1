use super::DATA_DIR;
use crate::error::AppError;
use crate::session::is_valid_word;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;

const WORDS_FILE: &str = "words.json";

#[derive(Deserialize, Debug)]
struct WordList {
    name: String,
    words: Vec<String>,
}

/// Source of secret words, asked once per session
pub trait WordProvider: Send {
    fn next_word(&mut self) -> String;
}

/// Random pick from the embedded word list
#[derive(Clone, Debug)]
pub struct RandomWord {
    words: Vec<String>,
}

impl RandomWord {
    pub fn new() -> Result<Self, AppError> {
        let file = DATA_DIR
            .get_file(WORDS_FILE)
            .ok_or_else(|| AppError::DataMissing(WORDS_FILE.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| AppError::data_invalid(WORDS_FILE, "not valid UTF-8"))?;
        let list: WordList = serde_json::from_str(contents)?;
        debug!(list = %list.name, size = list.words.len(), "loaded word list");
        Self::from_words(list.words)
    }

    /// Build from an arbitrary list; entries that are not plain a-z words are dropped.
    pub fn from_words(words: Vec<String>) -> Result<Self, AppError> {
        let words: Vec<String> = words.into_iter().filter(|w| is_valid_word(w)).collect();
        if words.is_empty() {
            return Err(AppError::data_invalid(WORDS_FILE, "no usable words"));
        }
        Ok(Self { words })
    }
}

impl WordProvider for RandomWord {
    fn next_word(&mut self) -> String {
        let mut rng = rand::thread_rng();
        // from_words guarantees a non-empty list
        self.words.choose(&mut rng).cloned().unwrap_or_default()
    }
}

/// Always the same word
#[derive(Clone, Debug)]
pub struct FixedWord(String);

impl FixedWord {
    pub fn new(word: &str) -> Result<Self, AppError> {
        let word = word.to_ascii_lowercase();
        if !is_valid_word(&word) {
            return Err(AppError::InvalidWord { word });
        }
        Ok(Self(word))
    }
}

impl WordProvider for FixedWord {
    fn next_word(&mut self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_embedded_word_list() {
        let mut provider = RandomWord::new().unwrap();
        assert!(provider.words.len() > 100);

        for _ in 0..50 {
            let word = provider.next_word();
            assert!(is_valid_word(&word), "{word:?}");
        }
    }

    #[test]
    fn test_from_words_filters_invalid() {
        let mut provider = RandomWord::from_words(vec![
            "".to_string(),
            "Caps".to_string(),
            "two words".to_string(),
            "café".to_string(),
            "fine".to_string(),
        ])
        .unwrap();

        assert_eq!(provider.words, vec!["fine".to_string()]);
        assert_eq!(provider.next_word(), "fine");
    }

    #[test]
    fn test_from_words_rejects_empty() {
        assert_matches!(
            RandomWord::from_words(vec!["123".to_string()]),
            Err(AppError::DataInvalid { .. })
        );
    }

    #[test]
    fn test_fixed_word() {
        let mut provider = FixedWord::new("Rust").unwrap();
        assert_eq!(provider.next_word(), "rust");
        assert_eq!(provider.next_word(), "rust");

        assert_matches!(FixedWord::new("r2d2"), Err(AppError::InvalidWord { .. }));
        assert_matches!(FixedWord::new(""), Err(AppError::InvalidWord { .. }));
    }
}
