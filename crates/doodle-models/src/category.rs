//! Fixed word-category vocabulary.
//!
//! The same table feeds the prompt hints and defines the closed set of
//! words a guess may resolve to.

/// Sentinel guess for an unrecognisable drawing.
pub const UNKNOWN_WORD: &str = "unknown";

/// A named group of candidate words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCategory {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

/// Category table, in prompt order.
pub const WORD_CATEGORIES: &[WordCategory] = &[
    WordCategory {
        name: "animals",
        words: &["cat", "dog", "fish", "lion", "owl", "pig", "duck", "ant"],
    },
    WordCategory {
        name: "objects",
        words: &["ball", "hat", "kite", "umbrella", "box", "book", "car", "key"],
    },
    WordCategory {
        name: "nature",
        words: &["tree", "moon", "rain", "sun", "flower", "apple", "grape", "orange"],
    },
    WordCategory {
        name: "people",
        words: &["girl", "queen", "boy", "baby"],
    },
    WordCategory {
        name: "body",
        words: &["nose", "eye", "foot", "hand", "leg", "ear"],
    },
    WordCategory {
        name: "other",
        words: &["house", "ice", "juice", "milk", "pen", "shoe", "table", "window"],
    },
];

/// Find the first category containing `word`.
pub fn category_of(word: &str) -> Option<&'static WordCategory> {
    WORD_CATEGORIES
        .iter()
        .find(|category| category.words.contains(&word))
}

/// Every word of the category `word` belongs to, `word` itself included.
///
/// Returns an empty slice when the word is outside the vocabulary.
pub fn similar_words(word: &str) -> &'static [&'static str] {
    category_of(word).map(|c| c.words).unwrap_or(&[])
}

/// Check whether `word` is part of the vocabulary.
pub fn is_vocabulary_word(word: &str) -> bool {
    category_of(word).is_some()
}

/// Iterate over the whole vocabulary in table order.
pub fn all_words() -> impl Iterator<Item = &'static str> {
    WORD_CATEGORIES
        .iter()
        .flat_map(|category| category.words.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similar_words_includes_target() {
        let words = similar_words("cat");
        assert_eq!(words, category_of("dog").unwrap().words);
        assert!(words.contains(&"cat"));
        assert_eq!(category_of("cat").unwrap().name, "animals");
    }

    #[test]
    fn test_similar_words_unknown_word() {
        assert!(similar_words("dragon").is_empty());
        assert!(similar_words(UNKNOWN_WORD).is_empty());
    }

    #[test]
    fn test_vocabulary_is_lowercase_single_tokens() {
        for word in all_words() {
            assert!(!word.is_empty());
            assert!(word.chars().all(|c| c.is_ascii_lowercase()), "{word}");
        }
        assert_eq!(all_words().count(), 42);
        assert!(!is_vocabulary_word(UNKNOWN_WORD));
    }
}
