//! Layered settings resolution.
//!
//! Each field resolves from its compiled-in default, then an environment
//! variable, then an explicit override. Every group validates after merging;
//! any violation fails the whole resolution.
//!
//! # Module layout
//!
//! - **env**: [`EnvSource`] snapshots (process env, optional `.env` file)
//!   and caller [`Overrides`].
//! - **field**: string parsing, constraint checks and the
//!   [`SettingsGroup`] trait.
//! - **types**: public group structs, defaults and derived values such as
//!   [`DatabaseSettings::database_url`].
//! - **groups**: per-group env prefixes, field parsing and check lists.
//!
//! ```
//! use chatbot_config::settings::{EnvSource, Overrides, Settings};
//!
//! let env = EnvSource::from_pairs([("LLM_TEMPERATURE", "0.9")]);
//! let settings = Settings::resolve(&env, &Overrides::new()).unwrap();
//! assert_eq!(settings.llm.temperature, 0.9);
//! ```

mod env;
mod field;
mod groups;
mod types;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

pub use env::{EnvSource, Overrides};
pub use field::SettingsGroup;
pub use types::*;

use field::{check_one_of, merge_layers, parse_bool, path};

// ── Error ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    /// A merged value violates its range or literal-set constraint.
    #[error("invalid value for {field}: {value:?} {constraint}")]
    Invalid {
        field: String,
        value: String,
        constraint: String,
    },

    /// A string from the environment or an override could not be converted.
    #[error("cannot parse {field} from {value:?}: expected {expected}")]
    Parse {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("unknown setting: {0}")]
    UnknownField(String),

    #[error("unsupported database type: {0}")]
    UnsupportedDbType(String),

    #[error("cannot read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

impl SettingsError {
    /// `true` for errors caused by a bad field value or name.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Invalid { .. } | Self::Parse { .. } | Self::UnknownField(_)
        )
    }

    /// Dotted path of the offending field, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Invalid { field, .. } | Self::Parse { field, .. } => Some(field),
            Self::UnknownField(path) => Some(path),
            Self::UnsupportedDbType(_) | Self::EnvFile { .. } => None,
        }
    }
}

// ── Root configuration ───────────────────────────────────────────────────────

/// Root field names. They have no env prefix (`APP_NAME`, `DEBUG`, …) and
/// their override paths have no group (`"app_name"`).
const ROOT_FIELDS: &[&str] = &["app_name", "app_version", "environment", "debug"];

/// Group names accepted as the first segment of an override path.
const GROUP_NAMES: &[&str] = &[
    LlmSettings::NAME,
    RedisSettings::NAME,
    DatabaseSettings::NAME,
    CheckpointerSettings::NAME,
    VectorStoreSettings::NAME,
    ApiSettings::NAME,
    LogSettings::NAME,
    MonitoringSettings::NAME,
];

/// Fully-resolved application settings.
///
/// Construct once at startup and pass by reference to consumers. Fields are
/// public so tests can adjust them; nothing here synchronises concurrent
/// writers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub app_name: String,
    pub app_version: String,
    /// `development`, `staging` or `production`.
    pub environment: String,
    pub debug: bool,
    pub llm: LlmSettings,
    pub redis: RedisSettings,
    pub database: DatabaseSettings,
    pub checkpointer: CheckpointerSettings,
    pub vector_store: VectorStoreSettings,
    pub api: ApiSettings,
    pub log: LogSettings,
    pub monitoring: MonitoringSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "LangGraph Chatbot".into(),
            app_version: "0.1.0".into(),
            environment: "development".into(),
            debug: true,
            llm: LlmSettings::default(),
            redis: RedisSettings::default(),
            database: DatabaseSettings::default(),
            checkpointer: CheckpointerSettings::default(),
            vector_store: VectorStoreSettings::default(),
            api: ApiSettings::default(),
            log: LogSettings::default(),
            monitoring: MonitoringSettings::default(),
        }
    }
}

impl Settings {
    /// Resolve every field from defaults, `env`, then `overrides`, and
    /// validate. Returns the first violation found.
    pub fn resolve(env: &EnvSource, overrides: &Overrides) -> Result<Self, SettingsError> {
        for p in overrides.paths() {
            if let Some((group, _)) = p.split_once('.') {
                if !GROUP_NAMES.contains(&group) {
                    return Err(SettingsError::UnknownField(p.to_string()));
                }
            }
        }

        let mut settings = Self {
            llm: LlmSettings::resolve(env, overrides)?,
            redis: RedisSettings::resolve(env, overrides)?,
            database: DatabaseSettings::resolve(env, overrides)?,
            checkpointer: CheckpointerSettings::resolve(env, overrides)?,
            vector_store: VectorStoreSettings::resolve(env, overrides)?,
            api: ApiSettings::resolve(env, overrides)?,
            log: LogSettings::resolve(env, overrides)?,
            monitoring: MonitoringSettings::resolve(env, overrides)?,
            ..Self::default()
        };

        merge_layers("", "", ROOT_FIELDS, env, overrides, |field, raw| {
            settings.apply_root(field, raw)
        })?;
        check_one_of("", "environment", &settings.environment, ENVIRONMENTS)?;

        Ok(settings)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    fn apply_root(&mut self, field: &str, raw: &str) -> Result<(), SettingsError> {
        match field {
            "app_name" => self.app_name = raw.to_string(),
            "app_version" => self.app_version = raw.to_string(),
            "environment" => self.environment = raw.to_string(),
            "debug" => self.debug = parse_bool("", field, raw)?,
            _ => return Err(SettingsError::UnknownField(path("", field))),
        }
        Ok(())
    }
}

/// Snapshot `env_file` (if present) plus the process environment, then
/// resolve. The process environment wins over file values.
pub fn load(env_file: Option<&Path>, overrides: &Overrides) -> Result<Settings, SettingsError> {
    let env = EnvSource::load(env_file)?;
    Settings::resolve(&env, overrides)
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(env: &[(&str, &str)], overrides: Overrides) -> Result<Settings, SettingsError> {
        Settings::resolve(&EnvSource::from_pairs(env.iter().copied()), &overrides)
    }

    #[test]
    fn empty_inputs_yield_defaults() {
        let s = resolve(&[], Overrides::new()).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.app_name, "LangGraph Chatbot");
        assert_eq!(s.app_version, "0.1.0");
        assert_eq!(s.environment, "development");
        assert!(s.debug);
    }

    #[test]
    fn env_then_override_precedence() {
        let env = [("LLM_TEMPERATURE", "0.9")];
        let s = resolve(&env, Overrides::new()).unwrap();
        assert_eq!(s.llm.temperature, 0.9);

        let s = resolve(&env, Overrides::new().set("llm.temperature", 0.3)).unwrap();
        assert_eq!(s.llm.temperature, 0.3);
    }

    #[test]
    fn root_fields_have_no_prefix() {
        let env = [("APP_NAME", "Env Bot"), ("ENVIRONMENT", "staging"), ("DEBUG", "false")];
        let s = resolve(&env, Overrides::new()).unwrap();
        assert_eq!(s.app_name, "Env Bot");
        assert_eq!(s.environment, "staging");
        assert!(!s.debug);
    }

    #[test]
    fn environment_membership() {
        for e in ENVIRONMENTS {
            let s = resolve(&[], Overrides::new().set("environment", e)).unwrap();
            assert_eq!(&s.environment, e);
        }
        let err = resolve(&[], Overrides::new().set("environment", "qa")).unwrap_err();
        assert_eq!(err.field(), Some("environment"));
    }

    #[test]
    fn unknown_group_in_override_is_rejected() {
        let err = resolve(&[], Overrides::new().set("cache.ttl", 1)).unwrap_err();
        assert_eq!(err, SettingsError::UnknownField("cache.ttl".into()));
    }

    #[test]
    fn unknown_root_override_is_rejected() {
        let err = resolve(&[], Overrides::new().set("app_nmae", "x")).unwrap_err();
        assert_eq!(err.field(), Some("app_nmae"));
    }

    #[test]
    fn failure_in_any_group_fails_everything() {
        let err = resolve(&[("API_PORT", "0")], Overrides::new()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("api.port"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let env = [("REDIS_HOST", "redis.test.com"), ("VECTOR_TOP_K", "8")];
        let o = Overrides::new().set("app_name", "Test Bot");
        let a = resolve(&env, o.clone()).unwrap();
        let b = resolve(&env, o).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn production_flag() {
        let s = resolve(&[("ENVIRONMENT", "production")], Overrides::new()).unwrap();
        assert!(s.is_production());
        assert!(!Settings::default().is_production());
    }

    #[test]
    fn error_display_mentions_field_value_and_constraint() {
        let err = resolve(&[("DB_DB_TYPE", "mongodb")], Overrides::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("database.db_type"));
        assert!(msg.contains("mongodb"));
        assert!(msg.contains("sqlite, postgresql, mysql"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.chatbot");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".chatbot"));
    }

    #[test]
    fn relative_path_unchanged() {
        assert_eq!(expand_home("data/logs"), PathBuf::from("data/logs"));
    }
}
