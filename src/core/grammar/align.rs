//! Word-diff aligner.
//!
//! Compares an original sentence against a rewritten sentence at word
//! granularity and converts the edit script into character-offset
//! correction candidates against the original text.

use super::candidate::{Candidate, Category, Span};
use crate::core::text::find_chars;

/// One aligned run in the word-level edit script, with half-open word-index
/// ranges into the original (`i1..i2`) and rewritten (`j1..j2`) sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub i1: usize,
    pub i2: usize,
    pub j1: usize,
    pub j2: usize,
}

/// Compute an LCS-based opcode sequence over two word sequences.
///
/// Contiguous non-matching runs between common words are classified as
/// `Replace` (words on both sides), `Delete` (original only), or `Insert`
/// (rewritten only).
pub fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    let n = a.len();
    let m = b.len();

    // dp[i][j] = LCS length of a[i..] and b[j..]
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    // Walk the table front-to-back into primitive steps, then coalesce
    // runs between common words into opcodes.
    #[derive(PartialEq, Clone, Copy)]
    enum Step {
        Eq,
        Del,
        Ins,
    }
    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            steps.push(Step::Eq);
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            steps.push(Step::Del);
            i += 1;
        } else {
            steps.push(Step::Ins);
            j += 1;
        }
    }
    steps.extend(std::iter::repeat(Step::Del).take(n - i));
    steps.extend(std::iter::repeat(Step::Ins).take(m - j));

    let mut ops: Vec<Opcode> = Vec::new();
    let (mut i, mut j) = (0, 0);
    let mut k = 0;
    while k < steps.len() {
        let (i1, j1) = (i, j);
        if steps[k] == Step::Eq {
            while k < steps.len() && steps[k] == Step::Eq {
                i += 1;
                j += 1;
                k += 1;
            }
            ops.push(Opcode {
                tag: OpTag::Equal,
                i1,
                i2: i,
                j1,
                j2: j,
            });
        } else {
            while k < steps.len() && steps[k] != Step::Eq {
                match steps[k] {
                    Step::Del => i += 1,
                    Step::Ins => j += 1,
                    Step::Eq => unreachable!(),
                }
                k += 1;
            }
            let tag = match (i > i1, j > j1) {
                (true, true) => OpTag::Replace,
                (true, false) => OpTag::Delete,
                _ => OpTag::Insert,
            };
            ops.push(Opcode {
                tag,
                i1,
                i2: i,
                j1,
                j2: j,
            });
        }
    }
    ops
}

/// Character spans of each word of `words` within `chars`, recovered by
/// scanning forward from the end of the previous word's span. Forward-only
/// first-occurrence search is a known approximation for repeated words; a
/// word that cannot be located falls back to the running position.
fn word_spans(chars: &[char], words: &[&str]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(words.len());
    let mut cursor = 0;
    for word in words {
        let needle: Vec<char> = word.chars().collect();
        match find_chars(chars, &needle, cursor) {
            Some(start) => {
                spans.push(Span::new(start, start + needle.len()));
                cursor = start + needle.len();
            }
            None => {
                let end = cursor + needle.len();
                spans.push(Span::new(cursor, end));
                cursor = end;
            }
        }
    }
    spans
}

/// Diff `original` against `rewritten` and return correction candidates,
/// every span offset by `base` (the sentence's starting character offset
/// within the full document).
pub fn diff_candidates(original: &str, rewritten: &str, base: usize) -> Vec<Candidate> {
    let chars: Vec<char> = original.chars().collect();
    let words_a: Vec<&str> = original.split_whitespace().collect();
    let words_b: Vec<&str> = rewritten.split_whitespace().collect();
    let spans = word_spans(&chars, &words_a);

    let mut candidates = Vec::new();
    for op in opcodes(&words_a, &words_b) {
        match op.tag {
            OpTag::Equal => {}
            OpTag::Replace => {
                if op.i2 - op.i1 == op.j2 - op.j1 {
                    // Same word count on both sides: report one candidate
                    // per changed word for precise highlighting.
                    for k in 0..(op.i2 - op.i1) {
                        let from = words_a[op.i1 + k];
                        let to = words_b[op.j1 + k];
                        if from == to {
                            continue;
                        }
                        candidates.push(replacement(spans[op.i1 + k], from, to, base));
                    }
                } else {
                    let span = Span::new(spans[op.i1].start, spans[op.i2 - 1].end);
                    let from = words_a[op.i1..op.i2].join(" ");
                    let to = words_b[op.j1..op.j2].join(" ");
                    candidates.push(replacement(span, &from, &to, base));
                }
            }
            OpTag::Delete => {
                let span = Span::new(spans[op.i1].start, spans[op.i2 - 1].end);
                let phrase = words_a[op.i1..op.i2].join(" ");
                candidates.push(Candidate::new(
                    Category::Grammar,
                    span.offset(base),
                    String::new(),
                    format!("\"{phrase}\" appears unnecessary and can be removed"),
                ));
            }
            OpTag::Insert => {
                let anchor = if op.i1 < words_a.len() {
                    spans[op.i1].start
                } else {
                    chars.len()
                };
                let phrase = words_b[op.j1..op.j2].join(" ");
                candidates.push(Candidate::new(
                    Category::Grammar,
                    Span::new(anchor, anchor).offset(base),
                    phrase.clone(),
                    format!("Possibly missing \"{phrase}\""),
                ));
            }
        }
    }
    candidates
}

fn replacement(span: Span, from: &str, to: &str, base: usize) -> Candidate {
    Candidate::new(
        Category::Grammar,
        span.offset(base),
        to.to_string(),
        format!("\"{from}\" may be incorrect; consider \"{to}\""),
    )
}
