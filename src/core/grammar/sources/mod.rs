//! Source adapters.
//!
//! Each adapter wraps one external corrector and normalizes its output into
//! correction candidates over the original text. Adapters never propagate
//! failures to the request: errors are caught at this boundary and become
//! empty source results.

pub mod rewrite;
pub mod rule_based;
pub mod statistical;

use std::time::Duration;

use thiserror::Error;

pub use rewrite::{LlmRewriter, RewriteSource, SentenceRewriter};
pub use rule_based::RuleClient;
pub use statistical::SpellCorrector;

/// Failure of a single source call. Every variant degrades to "no candidates
/// from this source" for the affected call only.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("source is not configured")]
    NotConfigured,
}
