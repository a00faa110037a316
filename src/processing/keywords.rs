//! Keyword overlap between a job description and a resume

use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub const DEFAULT_TOP_N_KEYWORDS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    /// Sorted, duplicate-free
    pub matched: Vec<String>,
    pub score: f32,
}

impl KeywordResult {
    fn empty() -> Self {
        Self {
            matched: Vec::new(),
            score: 0.0,
        }
    }
}

pub struct KeywordMatcher {
    processor: TextProcessor,
    top_n: usize,
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N_KEYWORDS)
    }
}

impl KeywordMatcher {
    pub fn new(top_n: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            top_n,
        }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Fraction of the description's `top_n` most frequent keywords found in the document
    pub fn keyword_overlap(&self, description: &str, document: &str) -> KeywordResult {
        let description_tokens = self.processor.tokenize(description);
        let document_tokens = self.processor.tokenize(document);

        if description_tokens.is_empty() || document_tokens.is_empty() {
            return KeywordResult::empty();
        }

        let keywords: HashSet<&str> = top_keywords(&description_tokens, self.top_n)
            .into_iter()
            .collect();
        if keywords.is_empty() {
            return KeywordResult::empty();
        }

        let document_set: HashSet<&str> = document_tokens.iter().map(String::as_str).collect();

        let mut matched: Vec<String> = keywords
            .intersection(&document_set)
            .map(|keyword| keyword.to_string())
            .collect();
        matched.sort();

        let score = matched.len() as f32 / keywords.len() as f32;

        KeywordResult { matched, score }
    }
}

/// The `top_n` most frequent distinct tokens.
///
/// Equal counts keep first-occurrence order.
pub fn top_keywords(tokens: &[String], top_n: usize) -> Vec<&str> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for token in tokens {
        match positions.get(token.as_str()) {
            Some(&index) => counts[index].1 += 1,
            None => {
                positions.insert(token.as_str(), counts.len());
                counts.push((token.as_str(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(top_n)
        .map(|(token, _)| token)
        .collect()
}
