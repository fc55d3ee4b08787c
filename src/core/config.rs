//! Configuration management for the Quarry document server.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{QuarryError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Path of the SSE event stream endpoint
    #[serde(default = "default_sse_path")]
    pub sse_path: String,

    /// Path clients POST JSON-RPC messages to
    #[serde(default = "default_message_path")]
    pub message_path: String,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON file holding the document records
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

/// Which backend answers search and fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Keyword matching over the in-memory store
    #[default]
    Local,
    /// Azure AI Search vector queries
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = QuarryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "remote" | "azure" => Ok(BackendKind::Remote),
            other => Err(QuarryError::ConfigError(format!(
                "Unknown backend '{other}' (expected 'local' or 'remote')"
            ))),
        }
    }
}

/// Backend selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub kind: BackendKind,
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Characters of document text kept in a search result
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// Maximum query string length
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

/// Remote semantic-search configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub openai_endpoint: Option<String>,

    #[serde(default)]
    pub openai_api_key: Option<String>,

    #[serde(default = "default_embedding_deployment")]
    pub embedding_deployment: String,

    #[serde(default = "default_openai_api_version")]
    pub openai_api_version: String,

    #[serde(default)]
    pub search_endpoint: Option<String>,

    #[serde(default)]
    pub search_api_key: Option<String>,

    #[serde(default = "default_index_name")]
    pub index_name: String,

    #[serde(default = "default_search_api_version")]
    pub search_api_version: String,

    /// Index field holding the content embeddings
    #[serde(default = "default_vector_field")]
    pub vector_field: String,

    /// Results returned when the caller gives no limit
    #[serde(default = "default_top")]
    pub default_top: usize,

    /// Upper bound on results per query
    #[serde(default = "default_max_top")]
    pub max_top: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_sec: u64,
}

// Keys stay out of Debug output
impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("openai_endpoint", &self.openai_endpoint)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("embedding_deployment", &self.embedding_deployment)
            .field("openai_api_version", &self.openai_api_version)
            .field("search_endpoint", &self.search_endpoint)
            .field("search_api_key", &redact(&self.search_api_key))
            .field("index_name", &self.index_name)
            .field("search_api_version", &self.search_api_version)
            .field("vector_field", &self.vector_field)
            .field("default_top", &self.default_top)
            .field("max_top", &self.max_top)
            .field("timeout_sec", &self.timeout_sec)
            .finish()
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_sse_path() -> String {
    "/sse".to_string()
}

fn default_message_path() -> String {
    "/messages/".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("sample_data.json")
}

fn default_snippet_chars() -> usize {
    200
}

fn default_max_query_length() -> usize {
    500
}

fn default_embedding_deployment() -> String {
    "text-embedding-3-small".to_string()
}

fn default_openai_api_version() -> String {
    "2024-02-01".to_string()
}

fn default_index_name() -> String {
    "documents-index".to_string()
}

fn default_search_api_version() -> String {
    "2024-07-01".to_string()
}

fn default_vector_field() -> String {
    "content_vector".to_string()
}

fn default_top() -> usize {
    5
}

fn default_max_top() -> usize {
    20
}

fn default_timeout() -> u64 {
    30
}

fn redact(secret: &Option<String>) -> &'static str {
    if secret.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            sse_path: default_sse_path(),
            message_path: default_message_path(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            snippet_chars: default_snippet_chars(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            openai_endpoint: None,
            openai_api_key: None,
            embedding_deployment: default_embedding_deployment(),
            openai_api_version: default_openai_api_version(),
            search_endpoint: None,
            search_api_key: None,
            index_name: default_index_name(),
            search_api_version: default_search_api_version(),
            vector_field: default_vector_field(),
            default_top: default_top(),
            max_top: default_max_top(),
            timeout_sec: default_timeout(),
        }
    }
}

impl RemoteConfig {
    /// Environment variables that must be set for the remote backend
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.openai_endpoint) {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if is_blank(&self.openai_api_key) {
            missing.push("AZURE_OPENAI_API_KEY");
        }
        if is_blank(&self.search_endpoint) {
            missing.push("AZURE_SEARCH_ENDPOINT");
        }
        if is_blank(&self.search_api_key) {
            missing.push("AZURE_SEARCH_API_KEY");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| QuarryError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with explicit XDG directories
    ///
    /// Environment variables override the file, which overrides defaults.
    /// File priority order:
    /// 1. QUARRY_CONFIG env var
    /// 2. XDG config file (~/.config/quarry/config.toml)
    /// 3. Legacy ./quarry.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("QUARRY_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("quarry.toml").exists() {
                Self::from_file("quarry.toml")?
            } else {
                Self::default()
            }
        };

        // Fall back to the XDG data directory when the default file is absent
        if config.store.data_file == default_data_file() && !config.store.data_file.exists() {
            config.store.data_file = xdg.default_data_file();
        }

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) -> Result<()> {
        // Server configuration
        if let Ok(host) = env::var("QUARRY_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("QUARRY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Store configuration
        if let Ok(data_file) = env::var("QUARRY_DATA_FILE") {
            self.store.data_file = PathBuf::from(data_file);
        }

        // Backend selection
        if let Ok(kind) = env::var("QUARRY_BACKEND") {
            self.backend.kind = kind.parse()?;
        }

        // Search configuration
        if let Ok(chars) = env::var("QUARRY_SNIPPET_CHARS") {
            if let Ok(n) = chars.parse() {
                self.search.snippet_chars = n;
            }
        }
        if let Ok(max_query_len) = env::var("QUARRY_MAX_QUERY_LENGTH") {
            if let Ok(len) = max_query_len.parse() {
                self.search.max_query_length = len;
            }
        }

        // Remote configuration, using the Azure variable names
        if let Ok(endpoint) = env::var("AZURE_OPENAI_ENDPOINT") {
            self.remote.openai_endpoint = Some(endpoint);
        }
        if let Ok(key) = env::var("AZURE_OPENAI_API_KEY") {
            self.remote.openai_api_key = Some(key);
        }
        if let Ok(deployment) = env::var("AZURE_OPENAI_EMBEDDING_DEPLOYMENT") {
            self.remote.embedding_deployment = deployment;
        }
        if let Ok(endpoint) = env::var("AZURE_SEARCH_ENDPOINT") {
            self.remote.search_endpoint = Some(endpoint);
        }
        if let Ok(key) = env::var("AZURE_SEARCH_API_KEY") {
            self.remote.search_api_key = Some(key);
        }
        if let Ok(index) = env::var("AZURE_SEARCH_INDEX_NAME") {
            self.remote.index_name = index;
        }
        if let Ok(timeout) = env::var("QUARRY_REMOTE_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.remote.timeout_sec = t;
            }
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(QuarryError::ConfigError("Port must be non-zero".to_string()));
        }

        if !self.server.sse_path.starts_with('/') || !self.server.message_path.starts_with('/') {
            return Err(QuarryError::ConfigError(
                "SSE and message paths must start with '/'".to_string(),
            ));
        }

        if self.search.snippet_chars == 0 {
            return Err(QuarryError::ConfigError(
                "Snippet length must be non-zero".to_string(),
            ));
        }

        if self.search.max_query_length == 0 {
            return Err(QuarryError::ConfigError(
                "Max query length must be non-zero".to_string(),
            ));
        }

        if self.remote.default_top == 0 || self.remote.max_top == 0 {
            return Err(QuarryError::ConfigError(
                "Remote result limits must be non-zero".to_string(),
            ));
        }

        if self.remote.default_top > self.remote.max_top {
            return Err(QuarryError::ConfigError(
                "Default top cannot exceed max top".to_string(),
            ));
        }

        if self.remote.timeout_sec == 0 {
            return Err(QuarryError::ConfigError(
                "Remote timeout must be non-zero".to_string(),
            ));
        }

        if self.backend.kind == BackendKind::Remote {
            let missing = self.remote.missing_settings();
            if !missing.is_empty() {
                return Err(QuarryError::ConfigError(format!(
                    "Remote backend requires: {}",
                    missing.join(", ")
                )));
            }
        }

        Ok(())
    }

    /// Copy of this configuration with API keys masked
    pub fn redacted(&self) -> Config {
        let mut config = self.clone();
        for key in [
            &mut config.remote.openai_api_key,
            &mut config.remote.search_api_key,
        ] {
            if key.is_some() {
                *key = Some(redact(key).to_string());
            }
        }
        config
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Backend: {}", self.backend.kind);
        tracing::info!("  Listen: {}:{}", self.server.host, self.server.port);
        tracing::info!(
            "  MCP endpoints: {} (events), {} (messages)",
            self.server.sse_path,
            self.server.message_path
        );
        tracing::info!("  Snippet length: {} chars", self.search.snippet_chars);
        tracing::info!("  Max query length: {}", self.search.max_query_length);
        match self.backend.kind {
            BackendKind::Local => {
                tracing::info!("  Data file: {:?}", self.store.data_file);
            }
            BackendKind::Remote => {
                tracing::info!("  Search endpoint: {:?}", self.remote.search_endpoint);
                tracing::info!("  Search API key: {}", redact(&self.remote.search_api_key));
                tracing::info!("  Index: {}", self.remote.index_name);
                tracing::info!("  Embeddings endpoint: {:?}", self.remote.openai_endpoint);
                tracing::info!("  Embeddings API key: {}", redact(&self.remote.openai_api_key));
                tracing::info!("  Embedding deployment: {}", self.remote.embedding_deployment);
                tracing::info!("  Timeout: {}s", self.remote.timeout_sec);
            }
        }
    }
}
