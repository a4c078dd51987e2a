//! Synonym lookup.
//!
//! Lookups go against a thesaurus table bundled into the binary, with a
//! tiny built-in map as the last-resort fallback. Unknown words yield an
//! empty list, never an error.

use std::collections::HashMap;

const BUNDLED_THESAURUS: &str = include_str!("../../data/thesaurus.txt");

/// In-memory thesaurus, built once at startup and shared read-only.
pub struct Thesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    /// Parse the bundled thesaurus table.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_THESAURUS)
    }

    fn parse(data: &str) -> Self {
        let mut entries = HashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((head, rest)) = line.split_once(':') else {
                continue;
            };
            let synonyms: Vec<String> = rest
                .split(',')
                .map(|s| s.trim().replace('_', " "))
                .filter(|s| !s.is_empty())
                .collect();
            if !synonyms.is_empty() {
                entries.insert(head.trim().to_lowercase(), synonyms);
            }
        }
        Self { entries }
    }

    /// Synonyms for `word` (case-insensitive). The word itself is excluded
    /// and duplicates are removed preserving first occurrence.
    pub fn lookup(&self, word: &str) -> Vec<String> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Vec::new();
        }

        let found = self
            .entries
            .get(&word)
            .cloned()
            .unwrap_or_else(|| fallback_synonyms(&word));

        let mut seen = std::collections::HashSet::new();
        found
            .into_iter()
            .filter(|s| s.to_lowercase() != word)
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect()
    }
}

/// Hardcoded fallback for when the bundled table has no entry.
fn fallback_synonyms(word: &str) -> Vec<String> {
    match word {
        "good" => vec![
            "excellent".to_string(),
            "great".to_string(),
            "superb".to_string(),
            "fine".to_string(),
        ],
        _ => Vec::new(),
    }
}
