//! TOML configuration parsing and validation.
//!
//! Every section is optional; an empty file yields a working canned-only
//! chatbot. See `config/folio.example.toml` for all keys.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::fallback::{CannedEntry, CannedResponseTable};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub persona: PersonaConfig,
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// What to answer when the completion call fails.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Return the fixed apology with a contact channel.
    #[default]
    Apology,
    /// Answer from the canned-response table instead.
    Canned,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Inline credential. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub on_error: OnError,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            on_error: OnError::default(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}
fn default_api_key_env() -> String {
    "FOLIO_API_KEY".to_string()
}
fn default_model() -> String {
    "llama3-70b-8192".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_timeout_secs() -> u64 {
    30
}

impl CompletionConfig {
    /// Resolve the bearer credential from the inline key or the environment.
    ///
    /// Returns `None` when nothing usable is set. Template placeholders such
    /// as `YOUR_API_KEY_HERE` count as unset.
    pub fn credential(&self) -> Option<String> {
        let key = match &self.api_key {
            Some(k) if !k.trim().is_empty() => k.trim().to_string(),
            _ => std::env::var(&self.api_key_env).ok()?.trim().to_string(),
        };
        if is_placeholder(&key) {
            None
        } else {
            Some(key)
        }
    }

    pub fn has_endpoint(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

fn is_placeholder(key: &str) -> bool {
    key.is_empty() || key.starts_with("YOUR_") || key.ends_with("_HERE")
}

#[derive(Debug, Deserialize, Clone)]
pub struct DocumentsConfig {
    /// Explicit document paths or URLs, loaded in order.
    #[serde(default)]
    pub paths: Vec<String>,
    /// Optional directory scanned for additional documents.
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            root: None,
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct PersonaConfig {
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    #[serde(default = "default_contact_email")]
    pub contact_email: String,
    /// Replaces the built-in persona when set.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            contact_email: default_contact_email(),
            system_prompt: None,
        }
    }
}

fn default_owner_name() -> String {
    "Hector Ulises Rodriguez Garcia".to_string()
}
fn default_contact_email() -> String {
    "hector.rodriguez@email.com".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FallbackConfig {
    /// Replaces the built-in table when non-empty.
    #[serde(default)]
    pub entries: Vec<CannedEntryConfig>,
    #[serde(default)]
    pub default_answer: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CannedEntryConfig {
    pub keywords: Vec<String>,
    pub answer: String,
}

impl FallbackConfig {
    /// Build the canned-response table, falling back to the built-in one.
    pub fn table(&self) -> CannedResponseTable {
        let builtin = CannedResponseTable::builtin();
        if self.entries.is_empty() && self.default_answer.is_none() {
            return builtin;
        }

        let entries = if self.entries.is_empty() {
            builtin.entries().to_vec()
        } else {
            self.entries
                .iter()
                .map(|e| CannedEntry::new(e.keywords.clone(), e.answer.clone()))
                .collect()
        };
        let default_answer = self
            .default_answer
            .clone()
            .unwrap_or_else(|| builtin.default_answer().to_string());

        CannedResponseTable::new(entries, default_answer)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;

    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    let completion = &config.completion;

    if !(0.0..=2.0).contains(&completion.temperature) {
        bail!("completion.temperature must be in [0.0, 2.0]");
    }
    if completion.max_tokens == 0 {
        bail!("completion.max_tokens must be > 0");
    }
    if completion.timeout_secs == 0 {
        bail!("completion.timeout_secs must be > 0");
    }

    for pattern in config
        .documents
        .include_globs
        .iter()
        .chain(&config.documents.exclude_globs)
    {
        globset::Glob::new(pattern)
            .with_context(|| format!("invalid document glob: '{}'", pattern))?;
    }

    // The fallback must always have something to say.
    for (i, entry) in config.fallback.entries.iter().enumerate() {
        if entry.keywords.iter().all(|k| k.trim().is_empty()) {
            bail!("fallback.entries[{}] needs at least one keyword", i);
        }
        if entry.answer.trim().is_empty() {
            bail!("fallback.entries[{}].answer must not be empty", i);
        }
    }
    if let Some(default_answer) = &config.fallback.default_answer {
        if default_answer.trim().is_empty() {
            bail!("fallback.default_answer must not be empty");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Result<Config> {
        let config: Config = toml::from_str(toml_src)?;
        validate(&config)?;
        Ok(config)
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.completion.model, "llama3-70b-8192");
        assert_eq!(config.completion.max_tokens, 1024);
        assert_eq!(config.completion.on_error, OnError::Apology);
        assert_eq!(config.documents.include_globs.len(), 2);
        assert_eq!(config.server.bind, "127.0.0.1:7341");
    }

    #[test]
    fn test_rejects_temperature_out_of_range() {
        let err = parse("[completion]\ntemperature = 2.5\n").unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_rejects_zero_max_tokens() {
        let err = parse("[completion]\nmax_tokens = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn test_rejects_empty_canned_answer() {
        let err = parse(
            r#"
[[fallback.entries]]
keywords = ["salary"]
answer = "  "
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("answer"));
    }

    #[test]
    fn test_rejects_entry_without_keywords() {
        let err = parse(
            r#"
[[fallback.entries]]
keywords = []
answer = "something"
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn test_placeholder_credential_is_unset() {
        let config = CompletionConfig {
            api_key: Some("YOUR_GROQ_API_KEY_HERE".to_string()),
            api_key_env: "FOLIO_TEST_UNSET_PLACEHOLDER".to_string(),
            ..Default::default()
        };
        assert_eq!(config.credential(), None);
    }

    #[test]
    fn test_inline_credential_wins() {
        let config = CompletionConfig {
            api_key: Some(" gsk_live ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.credential().as_deref(), Some("gsk_live"));
    }

    #[test]
    fn test_custom_fallback_table() {
        let config = parse(
            r#"
[fallback]
default_answer = "Ask me about hobbies."

[[fallback.entries]]
keywords = ["Hobby"]
answer = "Climbing."
"#,
        )
        .unwrap();
        let table = config.fallback.table();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.respond("any hobby?"), "Climbing.");
        assert_eq!(table.respond("weather"), "Ask me about hobbies.");
    }
}
