//! Text normalization and tokenization for keyword matching

use regex::Regex;
use std::collections::HashSet;

/// Closed list of common English function words
const STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your",
    "yours", "yourself", "yourselves", "he", "him", "his", "himself", "she",
    "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of",
    "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there",
];

/// A token starts with an alphanumeric and may carry `' # + . -` inside it.
/// It ends on an alphanumeric, or on `#`/`+` so that "c#" and "c++" survive.
const WORD_PATTERN: &str = r"[a-z0-9](?:[a-z0-9'#+.\-]*[a-z0-9#+])?";

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    word_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let word_regex = Regex::new(WORD_PATTERN).expect("Invalid word regex");

        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            word_regex,
        }
    }

    /// Lowercase, split into word tokens, drop stop words and 1-char tokens.
    ///
    /// Duplicates are kept in scan order since keyword ranking counts them.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();

        self.word_regex
            .find_iter(&lowered)
            .filter(|m| is_whole_word(&lowered, m.start(), m.end()))
            .map(|m| m.as_str())
            .filter(|token| token.len() > 1 && !self.is_stop_word(token))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

/// A match glued to a non-ASCII letter ("zürich" -> "rich") is a fragment, not a word
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
