//! Input layers for settings resolution.
//!
//! [`EnvSource`] is an immutable snapshot of environment variables, optionally
//! seeded from a dotenv file. [`Overrides`] carries explicit values passed by
//! the caller. Neither ever writes back to the process environment.

use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::Path;

use tracing::debug;

use super::SettingsError;

// ── Environment snapshot ─────────────────────────────────────────────────────

/// Case-insensitive snapshot of environment variables.
///
/// Keys are stored upper-cased, so `llm_temperature` and `LLM_TEMPERATURE`
/// name the same variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// A snapshot with no variables: resolution yields compiled-in defaults.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from explicit pairs. Later pairs win on collision.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut source = Self::default();
        source.extend(pairs);
        source
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_pairs(env::vars())
    }

    /// Seed from `env_file` (if given and present), then overlay the process
    /// environment, which takes precedence.
    ///
    /// A missing file is treated as absent configuration. A file that exists
    /// but cannot be parsed is an error.
    pub fn load(env_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut source = match env_file {
            Some(path) => Self::from_pairs(read_env_file(path)?),
            None => Self::default(),
        };
        source.vars.extend(Self::from_process().vars);
        Ok(source)
    }

    /// Look up `name` ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(&name.to_ascii_uppercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    fn extend<K, V, I>(&mut self, pairs: I)
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in pairs {
            self.vars.insert(k.as_ref().to_ascii_uppercase(), v.into());
        }
    }
}

/// Read every `KEY=value` pair from a dotenv file without touching the
/// process environment. Returns no pairs when the file does not exist.
fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, SettingsError> {
    let env_file_error = |e: dotenvy::Error| SettingsError::EnvFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => {
            debug!(path = %path.display(), "env file not found, skipped");
            return Ok(Vec::new());
        }
        Err(e) => return Err(env_file_error(e)),
    };

    let pairs = iter
        .collect::<Result<Vec<_>, _>>()
        .map_err(env_file_error)?;
    debug!(path = %path.display(), count = pairs.len(), "env file loaded");
    Ok(pairs)
}

// ── Explicit overrides ───────────────────────────────────────────────────────

/// Explicit values that beat both defaults and the environment.
///
/// Keys are dotted paths: `"llm.temperature"`, `"database.port"`, or a bare
/// root field such as `"app_name"`. Values go through the same string parsing
/// as environment variables.
///
/// ```
/// use chatbot_config::settings::Overrides;
///
/// let overrides = Overrides::new()
///     .set("llm.temperature", 0.3)
///     .set("app_name", "Test Bot");
/// assert_eq!(overrides.get("llm.temperature"), Some("0.3"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    values: BTreeMap<String, String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an override. A repeated path replaces the earlier value.
    pub fn set(mut self, path: &str, value: impl ToString) -> Self {
        self.values.insert(path.to_string(), value.to_string());
        self
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All override paths, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// `(field, value)` pairs addressed to `group`.
    ///
    /// An empty `group` selects root fields, i.e. paths without a dot.
    pub fn for_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.values.iter().filter_map(move |(path, value)| {
            let field = if group.is_empty() {
                (!path.contains('.')).then_some(path.as_str())
            } else {
                path.strip_prefix(group)
                    .and_then(|rest| rest.strip_prefix('.'))
            }?;
            Some((field, value.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_env(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn lookup_ignores_case() {
        let env = EnvSource::from_pairs([("llm_temperature", "0.9")]);
        assert_eq!(env.get("LLM_TEMPERATURE"), Some("0.9"));
        assert_eq!(env.get("Llm_Temperature"), Some("0.9"));
    }

    #[test]
    fn later_pairs_win() {
        let env = EnvSource::from_pairs([("API_PORT", "1"), ("api_port", "2")]);
        assert_eq!(env.get("API_PORT"), Some("2"));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn process_snapshot_is_upper_cased() {
        let snapshot = EnvSource::from_process();
        for (key, value) in env::vars() {
            if key.bytes().all(|b| !b.is_ascii_lowercase()) {
                assert_eq!(snapshot.get(&key), Some(value.as_str()), "{key}");
            }
        }
        assert!(snapshot.vars.keys().all(|k| !k.bytes().any(|b| b.is_ascii_lowercase())));
    }

    #[test]
    fn env_file_pairs_are_read() {
        let f = write_env("REDIS_HOST=redis.example.com\n# comment\nREDIS_PORT=6380\n");
        let pairs = read_env_file(f.path()).unwrap();
        assert!(pairs.contains(&("REDIS_HOST".into(), "redis.example.com".into())));
        assert!(pairs.contains(&("REDIS_PORT".into(), "6380".into())));
    }

    #[test]
    fn missing_env_file_is_silent() {
        let pairs = read_env_file(Path::new("/nonexistent/dir/.env")).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn malformed_env_file_errors() {
        let f = write_env("NOT A VALID LINE WITH 'QUOTE\n");
        let err = read_env_file(f.path()).unwrap_err();
        assert!(matches!(err, SettingsError::EnvFile { .. }));
    }

    #[test]
    fn overrides_split_by_group() {
        let o = Overrides::new()
            .set("llm.temperature", 0.5)
            .set("llm.max_tokens", 2048)
            .set("llmx.other", 1)
            .set("app_name", "Bot");

        let mut llm: Vec<_> = o.for_group("llm").collect();
        llm.sort();
        assert_eq!(llm, vec![("max_tokens", "2048"), ("temperature", "0.5")]);

        let root: Vec<_> = o.for_group("").collect();
        assert_eq!(root, vec![("app_name", "Bot")]);
    }

    #[test]
    fn override_set_replaces() {
        let o = Overrides::new().set("api.port", 1).set("api.port", 2);
        assert_eq!(o.get("api.port"), Some("2"));
    }
}
