//! Statistical spell-corrector adapter.
//!
//! SymSpell-based word-level correction, used only as a last-resort fallback
//! when no other source is available. Edit distance is capped by word length
//! so short words are never "corrected" into unrelated terms.

use std::path::Path;

use symspell::{SymSpell, UnicodeStringStrategy, Verbosity};
use tracing::{debug, warn};

use crate::core::grammar::candidate::{Candidate, Category, SourceResult, SourceTier, Span};
use crate::core::text::{find_chars, trim_word};

/// Statistical word corrector over a frequency dictionary.
///
/// An engine with no dictionary loaded corrects nothing, which keeps the
/// fallback inert rather than failing.
pub struct SpellCorrector {
    engine: SymSpell<UnicodeStringStrategy>,
    min_word_size_one_typo: usize,
    min_word_size_two_typos: usize,
}

impl SpellCorrector {
    /// Build the corrector, loading the frequency dictionary if one is
    /// configured (`term count` per line).
    pub fn new(
        dictionary_path: Option<&Path>,
        min_word_size_one_typo: usize,
        min_word_size_two_typos: usize,
    ) -> Self {
        let mut engine: SymSpell<UnicodeStringStrategy> = SymSpell::default();

        if let Some(path) = dictionary_path {
            if path.exists() {
                engine.load_dictionary(path.to_string_lossy().as_ref(), 0, 1, " ");
                debug!("Loaded spell dictionary from {}", path.display());
            } else {
                warn!(
                    "Spell dictionary {} not found; statistical fallback will correct nothing",
                    path.display()
                );
            }
        }

        Self {
            engine,
            min_word_size_one_typo,
            min_word_size_two_typos,
        }
    }

    /// Corrector with no dictionary loaded.
    pub fn empty() -> Self {
        Self {
            engine: SymSpell::default(),
            min_word_size_one_typo: 5,
            min_word_size_two_typos: 9,
        }
    }

    /// Per-word correction: identity (None) if no better form is known.
    pub fn correct_word(&self, word: &str) -> Option<String> {
        let word_lower = word.to_lowercase();
        let word_len = word_lower.chars().count();

        let max_edit_distance = if word_len < self.min_word_size_one_typo {
            return None;
        } else if word_len < self.min_word_size_two_typos {
            1
        } else {
            2
        };

        let suggestions = self
            .engine
            .lookup(&word_lower, Verbosity::Top, max_edit_distance as i64);

        suggestions.first().and_then(|s| {
            if s.term != word_lower && s.distance > 0 {
                Some(s.term.clone())
            } else {
                None
            }
        })
    }

    /// Run the fallback over the full text.
    ///
    /// Each misspelled word is located by first-occurrence search starting
    /// after the end of the previously located word, so repeated words do
    /// not rematch an earlier occurrence.
    pub fn check(&self, text: &str) -> SourceResult {
        let chars: Vec<char> = text.chars().collect();
        let mut candidates = Vec::new();
        let mut search_from = 0;

        for token in text.split_whitespace() {
            let word = trim_word(token);
            if word.is_empty() {
                continue;
            }
            let Some(corrected) = self.correct_word(word) else {
                continue;
            };

            let needle: Vec<char> = word.chars().collect();
            let Some(start) = find_chars(&chars, &needle, search_from) else {
                continue;
            };
            let end = start + needle.len();
            search_from = end;

            candidates.push(Candidate::new(
                Category::Spelling,
                Span::new(start, end),
                corrected,
                format!("Possible spelling mistake: \"{word}\""),
            ));
        }

        SourceResult::ok(SourceTier::Statistical, candidates)
    }
}
