use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub grammar: GrammarConfig,
    pub summarize: SummarizeConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the API server.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

/// Data directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

/// Grammar pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Enable the rule-based grammar service client.
    pub rules_enabled: bool,
    /// Base URL of a LanguageTool-compatible service (`/v2/check` is appended).
    pub rule_service_url: String,
    /// API key for the LLM sentence rewriter. The rewrite source is inactive
    /// without one.
    pub llm_api_key: Option<String>,
    /// Chat-completions model used for sentence rewriting.
    pub llm_model: String,
    /// Base URL of an OpenAI-compatible chat-completions endpoint.
    pub llm_base_url: String,
    /// Per-sentence timeout for the rewrite source, in seconds.
    pub sentence_timeout_secs: u64,
    /// Frequency dictionary for the statistical spell corrector
    /// (`term count` per line). No dictionary means no fallback corrections.
    pub dictionary_path: Option<PathBuf>,
    /// Words shorter than this are never corrected.
    pub min_word_size_one_typo: usize,
    /// Words at least this long allow two edits instead of one.
    pub min_word_size_two_typos: usize,
}

/// Summarization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizeConfig {
    /// Fraction of sentences to keep.
    pub ratio: f64,
    /// Minimum number of sentences in a summary.
    pub min_sentences: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            grammar: GrammarConfig::default(),
            summarize: SummarizeConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: None }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            rules_enabled: true,
            rule_service_url: "https://api.languagetool.org".to_string(),
            llm_api_key: None,
            llm_model: "gpt-4o-mini".to_string(),
            llm_base_url: "https://api.openai.com/v1".to_string(),
            sentence_timeout_secs: 3,
            dictionary_path: None,
            min_word_size_one_typo: 5,
            min_word_size_two_typos: 9,
        }
    }
}

impl Default for SummarizeConfig {
    fn default() -> Self {
        Self {
            ratio: 0.3,
            min_sentences: 2,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/studykit/config.toml`, then apply
    /// environment overrides. Returns `Default` if the file is missing or
    /// unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        let mut config = match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        };
        config.apply_env();
        config
    }

    /// Environment overrides for secrets and deploy knobs.
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("LLM_API_KEY") {
            if !key.trim().is_empty() {
                self.grammar.llm_api_key = Some(key.trim().to_string());
            }
        }
        if let Ok(url) = std::env::var("RULE_SERVICE_URL") {
            if !url.trim().is_empty() {
                self.grammar.rule_service_url = url.trim().to_string();
            }
        }
        if let Ok(path) = std::env::var("APP_DATABASE_PATH") {
            if !path.trim().is_empty() {
                self.data.data_dir = Some(PathBuf::from(path));
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => log::warn!("Ignoring unparseable PORT value: {port}"),
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("studykit"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("studykit").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
