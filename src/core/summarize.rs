//! Extractive summarization.
//!
//! Frequency-based sentence scoring: stopword-filtered word frequencies
//! score each sentence, and the top fraction is kept in original order.
//! Any degenerate input returns the original text unchanged.

use std::collections::HashMap;

use crate::core::text::{split_sentences, trim_word};

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "had", "has", "have",
    "he", "her", "his", "i", "if", "in", "is", "it", "its", "of", "on", "or", "our", "she", "so",
    "that", "the", "their", "them", "they", "this", "to", "was", "we", "were", "which", "will",
    "with", "you", "your",
];

/// Sentence-extraction summarizer.
#[derive(Debug, Clone)]
pub struct Summarizer {
    /// Fraction of sentences to keep.
    ratio: f64,
    /// Lower bound on kept sentences.
    min_sentences: usize,
}

impl Summarizer {
    pub fn new(ratio: f64, min_sentences: usize) -> Self {
        Self {
            ratio,
            min_sentences,
        }
    }

    /// Summarize `text`. Texts of two sentences or fewer come back
    /// unchanged.
    pub fn summarize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let sentences = split_sentences(text);
        if sentences.len() <= 2 {
            return text.to_string();
        }

        let frequencies = word_frequencies(text);
        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| (index, sentence_score(&sentence.text, &frequencies)))
            .collect();

        let keep = (self.ratio * sentences.len() as f64).floor() as usize;
        let keep = keep.max(self.min_sentences).min(sentences.len());

        // Highest-scoring sentences, then restore original order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        let mut kept: Vec<usize> = scored.into_iter().take(keep).map(|(i, _)| i).collect();
        kept.sort_unstable();

        kept.into_iter()
            .map(|i| sentences[i].text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(0.3, 2)
    }
}

fn word_frequencies(text: &str) -> HashMap<String, usize> {
    let mut frequencies = HashMap::new();
    for token in text.split_whitespace() {
        let word = trim_word(token).to_lowercase();
        if word.is_empty() || STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        *frequencies.entry(word).or_insert(0) += 1;
    }
    frequencies
}

fn sentence_score(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    let mut total = 0usize;
    let mut words = 0usize;
    for token in sentence.split_whitespace() {
        let word = trim_word(token).to_lowercase();
        if word.is_empty() {
            continue;
        }
        words += 1;
        total += frequencies.get(&word).copied().unwrap_or(0);
    }
    if words == 0 {
        return 0.0;
    }
    // Normalize by length so long sentences do not dominate automatically.
    total as f64 / words as f64
}
