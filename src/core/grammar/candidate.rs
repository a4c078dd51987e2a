//! Correction candidate types shared across the grammar pipeline.

use serde::{Deserialize, Serialize};

/// A half-open character-offset range `[start, end)` over the original
/// request text. `end == start` denotes a pure insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Strict interval overlap: `max(a.start, b.start) < min(a.end, b.end)`.
    /// Zero-width spans never overlap anything.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Shift both offsets by `base` (sentence offset within the document).
    pub fn offset(&self, base: usize) -> Span {
        Span::new(self.start + base, self.end + base)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Error category reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spelling,
    Grammar,
}

/// A single proposed edit against the original text.
///
/// Immutable once produced; serializes directly to the wire shape
/// (`type` / `position` / `suggestion` / `message`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "type")]
    pub category: Category,
    #[serde(rename = "position")]
    pub span: Span,
    /// Empty string means "delete the spanned text".
    pub suggestion: String,
    pub message: String,
}

impl Candidate {
    pub fn new(category: Category, span: Span, suggestion: String, message: String) -> Self {
        Self {
            category,
            span,
            suggestion,
            message,
        }
    }
}

/// Fixed merge priority of a correction source. Declaration order is merge
/// order: the sentence rewriter wins over the rule checker, which wins over
/// the statistical fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceTier {
    Rewrite,
    Rules,
    Statistical,
}

impl SourceTier {
    pub fn name(&self) -> &'static str {
        match self {
            SourceTier::Rewrite => "rewrite",
            SourceTier::Rules => "rules",
            SourceTier::Statistical => "statistical",
        }
    }
}

/// The outcome of one source for one request: its candidates in emission
/// order, plus whether the source call itself succeeded. A failed call
/// carries no candidates; the merger treats both cases uniformly.
#[derive(Debug, Clone)]
pub struct SourceResult {
    pub tier: SourceTier,
    pub candidates: Vec<Candidate>,
    pub success: bool,
}

impl SourceResult {
    pub fn ok(tier: SourceTier, candidates: Vec<Candidate>) -> Self {
        Self {
            tier,
            candidates,
            success: true,
        }
    }

    pub fn failed(tier: SourceTier) -> Self {
        Self {
            tier,
            candidates: Vec::new(),
            success: false,
        }
    }
}
