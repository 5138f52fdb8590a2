//! [`SettingsGroup`] implementations: env prefixes, field parsing and the
//! ordered validation checks for each group.

use super::SettingsError;
use super::field::{
    PORT_RANGE, SettingsGroup, check_min, check_one_of, check_range, parse_bool, parse_float,
    parse_list, parse_port, parse_secret, parse_uint, path,
};
use super::types::*;

fn unknown(group: &str, field: &str) -> SettingsError {
    SettingsError::UnknownField(path(group, field))
}

fn check_port(group: &str, field: &str, port: u16) -> Result<(), SettingsError> {
    check_range(group, field, i64::from(port), PORT_RANGE.0, PORT_RANGE.1)
}

impl SettingsGroup for LlmSettings {
    const NAME: &'static str = "llm";
    const ENV_PREFIX: &'static str = "LLM_";
    const FIELDS: &'static [&'static str] = &[
        "default_llm_provider",
        "openai_api_key",
        "openai_base_url",
        "openai_model",
        "anthropic_api_key",
        "anthropic_model",
        "openrouter_api_key",
        "openrouter_base_url",
        "openrouter_model",
        "temperature",
        "max_tokens",
        "timeout",
        "max_retries",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "default_llm_provider" => self.default_llm_provider = raw.to_string(),
            "openai_api_key" => self.openai_api_key = parse_secret(raw),
            "openai_base_url" => self.openai_base_url = raw.to_string(),
            "openai_model" => self.openai_model = raw.to_string(),
            "anthropic_api_key" => self.anthropic_api_key = parse_secret(raw),
            "anthropic_model" => self.anthropic_model = raw.to_string(),
            "openrouter_api_key" => self.openrouter_api_key = parse_secret(raw),
            "openrouter_base_url" => self.openrouter_base_url = raw.to_string(),
            "openrouter_model" => self.openrouter_model = raw.to_string(),
            "temperature" => self.temperature = parse_float(g, field, raw)?,
            "max_tokens" => self.max_tokens = parse_uint(g, field, raw)?,
            "timeout" => self.timeout = parse_uint(g, field, raw)?,
            "max_retries" => self.max_retries = parse_uint(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_one_of(g, "default_llm_provider", &self.default_llm_provider, LLM_PROVIDERS)?;
        check_range(g, "temperature", self.temperature, 0.0, 2.0)?;
        check_min(g, "max_tokens", self.max_tokens, 1)?;
        check_min(g, "timeout", self.timeout, 1)?;
        check_range(g, "max_retries", self.max_retries, 0, 10)
    }
}

impl SettingsGroup for RedisSettings {
    const NAME: &'static str = "redis";
    const ENV_PREFIX: &'static str = "REDIS_";
    const FIELDS: &'static [&'static str] = &[
        "host",
        "port",
        "db",
        "password",
        "max_connections",
        "socket_timeout",
        "session_ttl",
        "cache_ttl",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "host" => self.host = raw.to_string(),
            "port" => self.port = parse_port(g, field, raw)?,
            "db" => self.db = parse_uint(g, field, raw)?,
            "password" => self.password = parse_secret(raw),
            "max_connections" => self.max_connections = parse_uint(g, field, raw)?,
            "socket_timeout" => self.socket_timeout = parse_uint(g, field, raw)?,
            "session_ttl" => self.session_ttl = parse_uint(g, field, raw)?,
            "cache_ttl" => self.cache_ttl = parse_uint(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_port(g, "port", self.port)?;
        check_range(g, "db", self.db, 0, 15)?;
        check_min(g, "max_connections", self.max_connections, 1)?;
        check_min(g, "socket_timeout", self.socket_timeout, 1)?;
        check_min(g, "session_ttl", self.session_ttl, 1)?;
        check_min(g, "cache_ttl", self.cache_ttl, 1)
    }
}

impl SettingsGroup for DatabaseSettings {
    const NAME: &'static str = "database";
    const ENV_PREFIX: &'static str = "DB_";
    const FIELDS: &'static [&'static str] = &[
        "db_type",
        "sqlite_path",
        "host",
        "port",
        "username",
        "password",
        "database",
        "pool_size",
        "max_overflow",
        "echo",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "db_type" => self.db_type = raw.to_string(),
            "sqlite_path" => self.sqlite_path = raw.to_string(),
            "host" => self.host = raw.to_string(),
            "port" => self.port = parse_port(g, field, raw)?,
            "username" => self.username = raw.to_string(),
            "password" => self.password = parse_secret(raw),
            "database" => self.database = raw.to_string(),
            "pool_size" => self.pool_size = parse_uint(g, field, raw)?,
            "max_overflow" => self.max_overflow = parse_uint(g, field, raw)?,
            "echo" => self.echo = parse_bool(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_one_of(g, "db_type", &self.db_type, DB_TYPES)?;
        check_port(g, "port", self.port)?;
        check_min(g, "pool_size", self.pool_size, 1)
    }
}

impl SettingsGroup for CheckpointerSettings {
    const NAME: &'static str = "checkpointer";
    const ENV_PREFIX: &'static str = "CHECKPOINT_";
    const FIELDS: &'static [&'static str] = &[
        "checkpointer_type",
        "sqlite_path",
        "save_interval",
        "max_checkpoints",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "checkpointer_type" => self.checkpointer_type = raw.to_string(),
            "sqlite_path" => self.sqlite_path = raw.to_string(),
            "save_interval" => self.save_interval = parse_uint(g, field, raw)?,
            "max_checkpoints" => self.max_checkpoints = parse_uint(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_one_of(g, "checkpointer_type", &self.checkpointer_type, CHECKPOINTER_TYPES)?;
        check_min(g, "save_interval", self.save_interval, 1)?;
        check_min(g, "max_checkpoints", self.max_checkpoints, 1)
    }
}

impl SettingsGroup for VectorStoreSettings {
    const NAME: &'static str = "vector_store";
    const ENV_PREFIX: &'static str = "VECTOR_";
    const FIELDS: &'static [&'static str] = &[
        "vector_store_type",
        "chroma_persist_dir",
        "collection_name",
        "embedding_provider",
        "embedding_model",
        "top_k",
        "score_threshold",
        "chunk_size",
        "chunk_overlap",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "vector_store_type" => self.vector_store_type = raw.to_string(),
            "chroma_persist_dir" => self.chroma_persist_dir = raw.to_string(),
            "collection_name" => self.collection_name = raw.to_string(),
            "embedding_provider" => self.embedding_provider = raw.to_string(),
            "embedding_model" => self.embedding_model = raw.to_string(),
            "top_k" => self.top_k = parse_uint(g, field, raw)?,
            "score_threshold" => self.score_threshold = parse_float(g, field, raw)?,
            "chunk_size" => self.chunk_size = parse_uint(g, field, raw)?,
            "chunk_overlap" => self.chunk_overlap = parse_uint(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_one_of(g, "vector_store_type", &self.vector_store_type, VECTOR_STORE_TYPES)?;
        check_one_of(g, "embedding_provider", &self.embedding_provider, EMBEDDING_PROVIDERS)?;
        check_range(g, "top_k", self.top_k, 1, 100)?;
        check_range(g, "score_threshold", self.score_threshold, 0.0, 1.0)?;
        check_min(g, "chunk_size", self.chunk_size, 1)?;
        if self.chunk_overlap >= self.chunk_size {
            return Err(SettingsError::Invalid {
                field: path(g, "chunk_overlap"),
                value: self.chunk_overlap.to_string(),
                constraint: format!("must be less than chunk_size ({})", self.chunk_size),
            });
        }
        Ok(())
    }
}

impl SettingsGroup for ApiSettings {
    const NAME: &'static str = "api";
    const ENV_PREFIX: &'static str = "API_";
    const FIELDS: &'static [&'static str] = &[
        "host",
        "port",
        "workers",
        "secret_key",
        "algorithm",
        "access_token_expire_minutes",
        "cors_origins",
        "max_request_size",
        "request_timeout",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "host" => self.host = raw.to_string(),
            "port" => self.port = parse_port(g, field, raw)?,
            "workers" => self.workers = parse_uint(g, field, raw)?,
            "secret_key" => self.secret_key = parse_secret(raw),
            "algorithm" => self.algorithm = raw.to_string(),
            "access_token_expire_minutes" => {
                self.access_token_expire_minutes = parse_uint(g, field, raw)?
            }
            "cors_origins" => self.cors_origins = parse_list(g, field, raw)?,
            "max_request_size" => self.max_request_size = parse_uint(g, field, raw)?,
            "request_timeout" => self.request_timeout = parse_uint(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let g = Self::NAME;
        check_port(g, "port", self.port)?;
        check_min(g, "workers", self.workers, 1)?;
        check_one_of(g, "algorithm", &self.algorithm, JWT_ALGORITHMS)?;
        check_min(g, "access_token_expire_minutes", self.access_token_expire_minutes, 1)?;
        check_min(g, "max_request_size", self.max_request_size, 1)?;
        check_min(g, "request_timeout", self.request_timeout, 1)
    }
}

impl SettingsGroup for LogSettings {
    const NAME: &'static str = "log";
    const ENV_PREFIX: &'static str = "LOG_";
    const FIELDS: &'static [&'static str] = &[
        "level",
        "log_to_file",
        "log_dir",
        "log_file_name",
        "rotation",
        "retention",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "level" => self.level = raw.to_string(),
            "log_to_file" => self.log_to_file = parse_bool(g, field, raw)?,
            "log_dir" => self.log_dir = raw.to_string(),
            "log_file_name" => self.log_file_name = raw.to_string(),
            "rotation" => self.rotation = raw.to_string(),
            "retention" => self.retention = raw.to_string(),
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        check_one_of(Self::NAME, "level", &self.level, LOG_LEVELS)
    }
}

impl SettingsGroup for MonitoringSettings {
    const NAME: &'static str = "monitoring";
    const ENV_PREFIX: &'static str = "MONITORING_";
    const FIELDS: &'static [&'static str] = &[
        "enable_langsmith",
        "langsmith_api_key",
        "langsmith_project",
        "enable_prometheus",
        "prometheus_port",
    ];

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        let g = Self::NAME;
        match field {
            "enable_langsmith" => self.enable_langsmith = parse_bool(g, field, raw)?,
            "langsmith_api_key" => self.langsmith_api_key = parse_secret(raw),
            "langsmith_project" => self.langsmith_project = raw.to_string(),
            "enable_prometheus" => self.enable_prometheus = parse_bool(g, field, raw)?,
            "prometheus_port" => self.prometheus_port = parse_port(g, field, raw)?,
            _ => return Err(unknown(g, field)),
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        check_port(Self::NAME, "prometheus_port", self.prometheus_port)
    }
}
