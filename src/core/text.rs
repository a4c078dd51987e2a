//! Small text utilities shared by the grammar pipeline and the summarizer.
//!
//! All offsets in this module are character offsets, not byte offsets — the
//! grammar API reports positions in characters of the original text.

/// A sentence together with its starting character offset in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub offset: usize,
    pub text: String,
}

/// Split text into sentences on terminal punctuation (`.`, `!`, `?`)
/// followed by whitespace or end of text. Punctuation stays with its
/// sentence; surrounding whitespace is not included.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.get(i + 1).map_or(true, |next| next.is_whitespace());
        if at_boundary {
            push_sentence(&chars, start, i + 1, &mut sentences);
            start = i + 1;
        }
        i += 1;
    }
    push_sentence(&chars, start, chars.len(), &mut sentences);

    sentences
}

fn push_sentence(chars: &[char], start: usize, end: usize, out: &mut Vec<Sentence>) {
    // Trim whitespace while keeping the offset accurate.
    let mut s = start;
    let mut e = end;
    while s < e && chars[s].is_whitespace() {
        s += 1;
    }
    while e > s && chars[e - 1].is_whitespace() {
        e -= 1;
    }
    if s < e {
        out.push(Sentence {
            offset: s,
            text: chars[s..e].iter().collect(),
        });
    }
}

/// First occurrence of `needle` in `haystack` at or after character offset
/// `from`. Returns the character offset of the match.
pub fn find_chars(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }
    let last_start = haystack.len().checked_sub(needle.len())?;
    (from..=last_start).find(|&start| haystack[start..start + needle.len()] == *needle)
}

/// Strip leading/trailing non-alphanumeric characters from a word token.
pub fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}
