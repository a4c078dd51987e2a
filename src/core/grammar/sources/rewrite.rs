//! Sentence-rewrite source adapter.
//!
//! Splits the text into sentences and asks a rewriter backend to correct
//! each one; sentences that come back changed are word-diffed against the
//! original to produce position-accurate candidates. One sentence's failure
//! never aborts its siblings.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::SourceError;
use crate::config::GrammarConfig;
use crate::core::grammar::align;
use crate::core::grammar::candidate::{SourceResult, SourceTier};
use crate::core::text::split_sentences;

const SYSTEM_PROMPT: &str = "You are a grammar corrector. Rewrite the given sentence with all \
    spelling and grammar mistakes fixed. Keep the wording as close to the \
    original as possible. Reply with the corrected sentence only.";
const MAX_COMPLETION_TOKENS: u32 = 256;

/// A backend that corrects one sentence at a time. Implemented by the
/// remote LLM call; a locally loaded model plugs into the same seam.
#[async_trait]
pub trait SentenceRewriter: Send + Sync {
    async fn rewrite(&self, sentence: &str) -> Result<String, SourceError>;
}

/// Remote chat-completions rewriter.
pub struct LlmRewriter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl LlmRewriter {
    pub fn new(base_url: &str, api_key: &str, model: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl SentenceRewriter for LlmRewriter {
    async fn rewrite(&self, sentence: &str) -> Result<String, SourceError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": sentence },
            ],
            "temperature": 0,
            "max_tokens": MAX_COMPLETION_TOKENS,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| SourceError::InvalidResponse("missing completion content".to_string()))
    }
}

/// The sentence-rewrite source.
///
/// The backend handle is resolved lazily at most once per process and shared
/// read-only afterwards; concurrent first requests wait on the same
/// initialization instead of racing.
pub struct RewriteSource {
    config: GrammarConfig,
    handle: OnceCell<Option<Arc<dyn SentenceRewriter>>>,
    sentence_timeout: Duration,
}

impl RewriteSource {
    /// Build from configuration. Returns `None` when no backend could ever
    /// be resolved (no API key configured), which makes the source inactive.
    pub fn from_config(config: &GrammarConfig) -> Option<Self> {
        if config.llm_api_key.is_none() {
            return None;
        }
        Some(Self {
            config: config.clone(),
            handle: OnceCell::new(),
            sentence_timeout: Duration::from_secs(config.sentence_timeout_secs),
        })
    }

    /// Source with an injected backend (used by tests and for locally
    /// loaded models).
    pub fn with_rewriter(rewriter: Arc<dyn SentenceRewriter>, sentence_timeout: Duration) -> Self {
        let handle = OnceCell::new();
        // A fresh cell cannot already be set.
        let _ = handle.set(Some(rewriter));
        Self {
            config: GrammarConfig::default(),
            handle,
            sentence_timeout,
        }
    }

    async fn rewriter(&self) -> Option<Arc<dyn SentenceRewriter>> {
        self.handle
            .get_or_init(|| async {
                let api_key = self.config.llm_api_key.as_deref()?;
                match LlmRewriter::new(&self.config.llm_base_url, api_key, &self.config.llm_model) {
                    Ok(rewriter) => {
                        debug!(model = %self.config.llm_model, "Initialized LLM rewriter");
                        Some(Arc::new(rewriter) as Arc<dyn SentenceRewriter>)
                    }
                    Err(e) => {
                        warn!("Could not initialize LLM rewriter: {e}");
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// Rewrite every sentence of `text` and diff the changed ones.
    pub async fn check(&self, text: &str) -> SourceResult {
        let Some(rewriter) = self.rewriter().await else {
            return SourceResult::failed(SourceTier::Rewrite);
        };

        let mut candidates = Vec::new();
        let mut failures = 0usize;
        let sentences = split_sentences(text);
        let total = sentences.len();

        for sentence in sentences {
            let rewritten =
                match tokio::time::timeout(self.sentence_timeout, rewriter.rewrite(&sentence.text))
                    .await
                {
                    Ok(Ok(rewritten)) => rewritten,
                    Ok(Err(e)) => {
                        warn!(offset = sentence.offset, "Sentence rewrite failed: {e}");
                        failures += 1;
                        continue;
                    }
                    Err(_) => {
                        warn!(
                            offset = sentence.offset,
                            timeout_secs = self.sentence_timeout.as_secs(),
                            "Sentence rewrite timed out"
                        );
                        failures += 1;
                        continue;
                    }
                };

            if rewritten.trim() != sentence.text.trim() {
                candidates.extend(align::diff_candidates(
                    &sentence.text,
                    &rewritten,
                    sentence.offset,
                ));
            }
        }

        if failures > 0 && failures == total {
            return SourceResult::failed(SourceTier::Rewrite);
        }
        SourceResult::ok(SourceTier::Rewrite, candidates)
    }
}
