//! Rule-based source adapter.
//!
//! Client for a LanguageTool-compatible grammar service. Each native match
//! becomes one correction candidate; matches whose issue type denotes a
//! misspelling are classified `spelling`, everything else `grammar`.

use std::time::Duration;

use serde::Deserialize;

use super::SourceError;
use crate::core::grammar::candidate::{Candidate, Category, Span};

const CHECK_PATH: &str = "/v2/check";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One match from the rule service.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleMatch {
    pub offset: usize,
    pub length: usize,
    pub message: String,
    #[serde(default)]
    pub replacements: Vec<Replacement>,
    #[serde(default)]
    pub rule: MatchRule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Replacement {
    pub value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchRule {
    #[serde(rename = "issueType", default)]
    pub issue_type: String,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<RuleMatch>,
}

/// HTTP client for the rule-based checker, constructed once at startup and
/// shared read-only across requests.
pub struct RuleClient {
    client: reqwest::Client,
    base_url: String,
}

impl RuleClient {
    /// Build the client. Returns `None` when the client cannot be
    /// constructed; the source is then inactive for the whole process.
    pub fn new(base_url: &str) -> Option<Self> {
        let client = match reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Could not construct rule service client: {e}");
                return None;
            }
        };
        Some(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Check `text` against the rule service and map matches to candidates.
    pub async fn check(&self, text: &str) -> Result<Vec<Candidate>, SourceError> {
        let url = format!("{}{}", self.base_url, CHECK_PATH);
        let response = self
            .client
            .post(&url)
            .form(&[("text", text), ("language", "en-US")])
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

        let body: CheckResponse = response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        Ok(candidates_from_matches(&body.matches))
    }
}

/// Convert rule-service matches into correction candidates.
///
/// Tolerates empty replacement lists (empty suggestion means no automatic
/// fix is offered).
pub fn candidates_from_matches(matches: &[RuleMatch]) -> Vec<Candidate> {
    matches
        .iter()
        .map(|m| {
            let category = if m.rule.issue_type == "misspelling" {
                Category::Spelling
            } else {
                Category::Grammar
            };
            let suggestion = m
                .replacements
                .first()
                .map(|r| r.value.clone())
                .unwrap_or_default();
            Candidate::new(
                category,
                Span::new(m.offset, m.offset + m.length),
                suggestion,
                m.message.clone(),
            )
        })
        .collect()
}
