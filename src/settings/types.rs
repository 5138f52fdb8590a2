//! Public settings groups.
//!
//! These are the resolved, ready-to-use structs consumers read. Parsing and
//! validation for each group lives in `groups.rs`. Secrets are never
//! serialized.

use std::path::PathBuf;

use serde::Serialize;

use super::SettingsError;
use super::expand_home;

// ── Literal sets ─────────────────────────────────────────────────────────────

pub const ENVIRONMENTS: &[&str] = &["development", "staging", "production"];
pub const LLM_PROVIDERS: &[&str] = &["openai", "anthropic", "openrouter"];
pub const DB_TYPES: &[&str] = &["sqlite", "postgresql", "mysql"];
pub const CHECKPOINTER_TYPES: &[&str] = &["memory", "sqlite", "postgres", "redis"];
pub const VECTOR_STORE_TYPES: &[&str] = &["chroma", "faiss", "qdrant"];
pub const EMBEDDING_PROVIDERS: &[&str] = &["openai", "huggingface"];
pub const JWT_ALGORITHMS: &[&str] = &["HS256", "HS384", "HS512"];
pub const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

// ── LLM ──────────────────────────────────────────────────────────────────────

/// Model provider credentials and sampling defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmSettings {
    /// Provider used when a caller does not pick one (`openai`, `anthropic`,
    /// `openrouter`).
    pub default_llm_provider: String,
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    #[serde(skip_serializing)]
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    #[serde(skip_serializing)]
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    pub openrouter_model: String,
    /// Sampling temperature, `0.0..=2.0`.
    pub temperature: f64,
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout: u64,
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            default_llm_provider: "openrouter".into(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com/v1".into(),
            openai_model: "gpt-4o".into(),
            anthropic_api_key: None,
            anthropic_model: "claude-3-5-sonnet-20241022".into(),
            openrouter_api_key: None,
            openrouter_base_url: "https://openrouter.ai/api/v1".into(),
            openrouter_model: "anthropic/claude-3.5-sonnet".into(),
            temperature: 0.7,
            max_tokens: 4096,
            timeout: 60,
            max_retries: 3,
        }
    }
}

impl LlmSettings {
    /// Model configured for `default_llm_provider`, `None` for an unknown
    /// provider.
    pub fn active_model(&self) -> Option<&str> {
        match self.default_llm_provider.as_str() {
            "openai" => Some(&self.openai_model),
            "anthropic" => Some(&self.anthropic_model),
            "openrouter" => Some(&self.openrouter_model),
            _ => None,
        }
    }
}

// ── Redis cache ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    /// Logical database index, `0..=15`.
    pub db: u32,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub max_connections: u32,
    /// Socket timeout in seconds.
    pub socket_timeout: u64,
    /// Session key lifetime in seconds.
    pub session_ttl: u64,
    /// Cached value lifetime in seconds.
    pub cache_ttl: u64,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 6379,
            db: 0,
            password: None,
            max_connections: 10,
            socket_timeout: 5,
            session_ttl: 3600,
            cache_ttl: 300,
        }
    }
}

impl RedisSettings {
    /// `redis://[:password@]host:port/db`, recomputed on every call.
    pub fn redis_url(&self) -> String {
        match &self.password {
            Some(pw) => format!("redis://:{pw}@{}:{}/{}", self.host, self.port, self.db),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

/// Relational store. `sqlite_path` is used for `sqlite`; the network fields
/// for `postgresql` and `mysql`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseSettings {
    pub db_type: String,
    pub sqlite_path: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub database: String,
    pub pool_size: u32,
    pub max_overflow: u32,
    /// Echo SQL statements to the log.
    pub echo: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            db_type: "sqlite".into(),
            sqlite_path: "data/chatbot.db".into(),
            host: "localhost".into(),
            port: 5432,
            username: "postgres".into(),
            password: None,
            database: "chatbot".into(),
            pool_size: 5,
            max_overflow: 10,
            echo: false,
        }
    }
}

impl DatabaseSettings {
    /// Connection string for the configured `db_type`.
    ///
    /// Computed from the current field values on every call. Fails with
    /// [`SettingsError::UnsupportedDbType`] when `db_type` has no template,
    /// which can only happen after a resolved value was mutated.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        let scheme = match self.db_type.as_str() {
            "sqlite" => return Ok(format!("sqlite+aiosqlite:///{}", self.sqlite_path)),
            "postgresql" => "postgresql+asyncpg",
            "mysql" => "mysql+aiomysql",
            other => return Err(SettingsError::UnsupportedDbType(other.to_string())),
        };
        let credentials = match &self.password {
            Some(pw) => format!("{}:{pw}", self.username),
            None => self.username.clone(),
        };
        Ok(format!(
            "{scheme}://{credentials}@{}:{}/{}",
            self.host, self.port, self.database
        ))
    }
}

// ── Checkpoint store ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointerSettings {
    pub checkpointer_type: String,
    pub sqlite_path: String,
    /// Save a checkpoint every N steps.
    pub save_interval: u32,
    pub max_checkpoints: u32,
}

impl Default for CheckpointerSettings {
    fn default() -> Self {
        Self {
            checkpointer_type: "sqlite".into(),
            sqlite_path: "data/checkpoints/checkpoints.db".into(),
            save_interval: 1,
            max_checkpoints: 10,
        }
    }
}

// ── Vector store ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorStoreSettings {
    pub vector_store_type: String,
    pub chroma_persist_dir: String,
    pub collection_name: String,
    pub embedding_provider: String,
    pub embedding_model: String,
    /// Number of neighbours returned per query.
    pub top_k: u32,
    /// Minimum similarity score, `0.0..=1.0`.
    pub score_threshold: f64,
    pub chunk_size: u32,
    /// Must stay below `chunk_size`.
    pub chunk_overlap: u32,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            vector_store_type: "chroma".into(),
            chroma_persist_dir: "data/chroma".into(),
            collection_name: "chatbot_docs".into(),
            embedding_provider: "openai".into(),
            embedding_model: "text-embedding-3-small".into(),
            top_k: 5,
            score_threshold: 0.7,
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

// ── API server ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiSettings {
    pub host: String,
    pub port: u16,
    pub workers: u32,
    /// JWT signing key.
    #[serde(skip_serializing)]
    pub secret_key: Option<String>,
    /// JWT algorithm (`HS256`, `HS384`, `HS512`).
    pub algorithm: String,
    pub access_token_expire_minutes: u64,
    pub cors_origins: Vec<String>,
    /// Maximum request body in bytes.
    pub max_request_size: u64,
    /// Request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            workers: 1,
            secret_key: None,
            algorithm: "HS256".into(),
            access_token_expire_minutes: 30,
            cors_origins: vec!["*".into()],
            max_request_size: 10 * 1024 * 1024,
            request_timeout: 300,
        }
    }
}

impl ApiSettings {
    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Logging ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogSettings {
    /// One of `DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`.
    pub level: String,
    pub log_to_file: bool,
    pub log_dir: String,
    pub log_file_name: String,
    pub rotation: String,
    pub retention: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "INFO".into(),
            log_to_file: true,
            log_dir: "data/logs".into(),
            log_file_name: "chatbot.log".into(),
            rotation: "1 day".into(),
            retention: "30 days".into(),
        }
    }
}

impl LogSettings {
    /// `log_dir/log_file_name`, with a leading `~` expanded.
    pub fn log_file_path(&self) -> PathBuf {
        expand_home(&self.log_dir).join(&self.log_file_name)
    }
}

// ── Monitoring ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringSettings {
    pub enable_langsmith: bool,
    #[serde(skip_serializing)]
    pub langsmith_api_key: Option<String>,
    pub langsmith_project: String,
    pub enable_prometheus: bool,
    pub prometheus_port: u16,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            enable_langsmith: false,
            langsmith_api_key: None,
            langsmith_project: "langgraph-chatbot".into(),
            enable_prometheus: false,
            prometheus_port: 9090,
        }
    }
}
