//! Grammar-correction pipeline.
//!
//! Fans the request text out to the active correction sources, reconciles
//! their candidate lists into a single non-overlapping, position-accurate
//! error list, and degrades gracefully as sources become unavailable. The
//! worst case is an empty (but successful) error list — there is no fatal
//! error path here.

pub mod align;
pub mod candidate;
pub mod merge;
pub mod sources;

use tracing::{debug, info, warn};

pub use candidate::{Candidate, Category, SourceResult, SourceTier, Span};

use crate::config::GrammarConfig;
use sources::{RewriteSource, RuleClient, SpellCorrector};

/// The grammar service: one per process, shared read-only across requests.
pub struct GrammarService {
    rules: Option<RuleClient>,
    rewrite: Option<RewriteSource>,
    spell: SpellCorrector,
}

impl GrammarService {
    /// Construct all sources from configuration. A source that cannot be
    /// constructed is simply inactive; it is never an error.
    pub fn from_config(config: &GrammarConfig) -> Self {
        let rules = if config.rules_enabled {
            RuleClient::new(&config.rule_service_url)
        } else {
            None
        };
        let rewrite = RewriteSource::from_config(config);
        let spell = SpellCorrector::new(
            config.dictionary_path.as_deref(),
            config.min_word_size_one_typo,
            config.min_word_size_two_typos,
        );

        info!(
            rules_active = rules.is_some(),
            rewrite_active = rewrite.is_some(),
            "Grammar service constructed"
        );

        Self {
            rules,
            rewrite,
            spell,
        }
    }

    /// Assemble a service from explicit sources (tests and embedding).
    pub fn new(
        rules: Option<RuleClient>,
        rewrite: Option<RewriteSource>,
        spell: SpellCorrector,
    ) -> Self {
        Self {
            rules,
            rewrite,
            spell,
        }
    }

    /// Check `text` and return the final error list: non-overlapping,
    /// sorted ascending by span start.
    ///
    /// Availability is re-evaluated per request: the rule-based and rewrite
    /// sources run whenever their handles exist (a call-time failure only
    /// empties that call's result), and the statistical fallback runs only
    /// when the rule-based source is inactive and nothing else found errors.
    pub async fn check(&self, text: &str) -> Vec<Candidate> {
        let (rewrite_result, rule_result) = tokio::join!(
            async {
                match &self.rewrite {
                    Some(source) => Some(source.check(text).await),
                    None => None,
                }
            },
            async {
                match &self.rules {
                    Some(client) => Some(match client.check(text).await {
                        Ok(candidates) => SourceResult::ok(SourceTier::Rules, candidates),
                        Err(e) => {
                            warn!("Rule-based check failed: {e}");
                            SourceResult::failed(SourceTier::Rules)
                        }
                    }),
                    None => None,
                }
            },
        );

        let mut results: Vec<SourceResult> = Vec::new();
        if let Some(result) = rewrite_result {
            results.push(result);
        }
        if let Some(result) = rule_result {
            results.push(result);
        }

        let nothing_found = results.iter().all(|r| r.candidates.is_empty());
        if self.rules.is_none() && nothing_found {
            debug!("No rule-based source and no findings; running statistical fallback");
            results.push(self.spell.check(text));
        }

        let active: Vec<&str> = results.iter().map(|r| r.tier.name()).collect();
        let errors = merge::merge(results);
        info!(
            sources = ?active,
            errors = errors.len(),
            chars = text.chars().count(),
            "Grammar check complete"
        );
        errors
    }
}
