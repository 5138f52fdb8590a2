//! Field-level parsing, validation checks and the [`SettingsGroup`] trait.
//!
//! Every group resolves the same way: start from defaults, take each field's
//! explicit override or else its environment variable, parse it, then run
//! the group's ordered list of checks. The first failing check aborts resolution.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use super::SettingsError;
use super::env::{EnvSource, Overrides};

/// Inclusive bounds for TCP ports.
pub(crate) const PORT_RANGE: (i64, i64) = (1, 65535);

/// A named, validated bundle of settings with its own env-var prefix.
pub trait SettingsGroup: Default + Sized {
    /// Override path segment and error-message prefix, e.g. `"llm"`.
    const NAME: &'static str;
    /// Environment-variable prefix, e.g. `"LLM_"`.
    const ENV_PREFIX: &'static str;
    /// Every field name this group accepts.
    const FIELDS: &'static [&'static str];

    /// Parse `raw` into `field`. `field` is always one of [`Self::FIELDS`].
    fn apply(&mut self, field: &str, raw: &str) -> Result<(), SettingsError>;

    /// Run the post-merge checks.
    fn validate(&self) -> Result<(), SettingsError>;

    /// Resolve this group alone: defaults, then `env`, then `overrides`.
    fn resolve(env: &EnvSource, overrides: &Overrides) -> Result<Self, SettingsError> {
        let mut group = Self::default();
        merge_layers(
            Self::NAME,
            Self::ENV_PREFIX,
            Self::FIELDS,
            env,
            overrides,
            |field, raw| group.apply(field, raw),
        )?;
        group.validate()?;
        Ok(group)
    }
}

/// Pick the winning raw value of every field in one group and feed it to
/// `apply`: an override beats the environment, which beats the default.
///
/// Only the winning value is parsed, so an environment value shadowed by an
/// override is never looked at. Unknown environment variables are ignored;
/// unknown override fields are rejected.
pub(crate) fn merge_layers<F>(
    group: &str,
    env_prefix: &str,
    fields: &[&str],
    env: &EnvSource,
    overrides: &Overrides,
    mut apply: F,
) -> Result<(), SettingsError>
where
    F: FnMut(&str, &str) -> Result<(), SettingsError>,
{
    let mut explicit = HashMap::new();
    for (field, raw) in overrides.for_group(group) {
        if !fields.contains(&field) {
            return Err(SettingsError::UnknownField(path(group, field)));
        }
        explicit.insert(field, raw);
    }
    for &field in fields {
        let var = format!("{env_prefix}{}", field.to_ascii_uppercase());
        if let Some(raw) = explicit.get(field).copied().or_else(|| env.get(&var)) {
            apply(field, raw)?;
        }
    }
    Ok(())
}

/// Dotted path used in error messages: `"llm.temperature"` or `"debug"`.
pub(crate) fn path(group: &str, field: &str) -> String {
    if group.is_empty() {
        field.to_string()
    } else {
        format!("{group}.{field}")
    }
}

// ── Parsing ──────────────────────────────────────────────────────────────────

fn parse_error(group: &str, field: &str, raw: &str, expected: &'static str) -> SettingsError {
    SettingsError::Parse {
        field: path(group, field),
        value: raw.to_string(),
        expected,
    }
}

/// Parse an unsigned integer field.
pub(crate) fn parse_uint<T: FromStr>(group: &str, field: &str, raw: &str) -> Result<T, SettingsError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| parse_error(group, field, raw, "a non-negative integer"))
}

/// Parse a float field; NaN is rejected.
pub(crate) fn parse_float(group: &str, field: &str, raw: &str) -> Result<f64, SettingsError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| parse_error(group, field, raw, "a number"))?;
    if value.is_nan() {
        return Err(SettingsError::Invalid {
            field: path(group, field),
            value: raw.to_string(),
            constraint: "must be a number".into(),
        });
    }
    Ok(value)
}

/// Parse a port. Any integer is accepted syntactically; values that do not
/// fit a port report the port range rather than a type error. The lower
/// bound is left to `validate`.
pub(crate) fn parse_port(group: &str, field: &str, raw: &str) -> Result<u16, SettingsError> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| parse_error(group, field, raw, "an integer"))?;
    u16::try_from(value).map_err(|_| SettingsError::Invalid {
        field: path(group, field),
        value: value.to_string(),
        constraint: format!("must be between {} and {}", PORT_RANGE.0, PORT_RANGE.1),
    })
}

pub(crate) fn parse_bool(group: &str, field: &str, raw: &str) -> Result<bool, SettingsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(parse_error(group, field, raw, "a boolean")),
    }
}

/// Secrets: the empty string means unset.
pub(crate) fn parse_secret(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

/// A JSON array of strings, or a comma-separated list.
pub(crate) fn parse_list(group: &str, field: &str, raw: &str) -> Result<Vec<String>, SettingsError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|_| parse_error(group, field, raw, "a JSON array of strings"));
    }
    Ok(trimmed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

// ── Checks ───────────────────────────────────────────────────────────────────

/// `lo <= value <= hi`.
pub(crate) fn check_range<T>(group: &str, field: &str, value: T, lo: T, hi: T) -> Result<(), SettingsError>
where
    T: PartialOrd + Display,
{
    if value < lo || value > hi {
        return Err(SettingsError::Invalid {
            field: path(group, field),
            value: value.to_string(),
            constraint: format!("must be between {lo} and {hi}"),
        });
    }
    Ok(())
}

/// `value >= lo`.
pub(crate) fn check_min<T>(group: &str, field: &str, value: T, lo: T) -> Result<(), SettingsError>
where
    T: PartialOrd + Display,
{
    if value < lo {
        return Err(SettingsError::Invalid {
            field: path(group, field),
            value: value.to_string(),
            constraint: format!("must be at least {lo}"),
        });
    }
    Ok(())
}

/// `value` is one of `allowed` (case-sensitive).
pub(crate) fn check_one_of(group: &str, field: &str, value: &str, allowed: &[&str]) -> Result<(), SettingsError> {
    if !allowed.contains(&value) {
        return Err(SettingsError::Invalid {
            field: path(group, field),
            value: value.to_string(),
            constraint: format!("must be one of: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_spellings() {
        for raw in ["true", "TRUE", "1", "yes", "On"] {
            assert!(parse_bool("log", "log_to_file", raw).unwrap(), "{raw}");
        }
        for raw in ["false", "0", "no", "OFF"] {
            assert!(!parse_bool("log", "log_to_file", raw).unwrap(), "{raw}");
        }
        assert!(parse_bool("log", "log_to_file", "maybe").is_err());
    }

    #[test]
    fn list_accepts_json_and_commas() {
        let json = parse_list("api", "cors_origins", r#"["http://a", "http://b"]"#).unwrap();
        assert_eq!(json, vec!["http://a", "http://b"]);
        let csv = parse_list("api", "cors_origins", "http://a, http://b,").unwrap();
        assert_eq!(csv, vec!["http://a", "http://b"]);
        assert!(parse_list("api", "cors_origins", "[1, 2").is_err());
    }

    #[test]
    fn port_out_of_range_reports_range() {
        let err = parse_port("api", "port", "70000").unwrap_err();
        match err {
            SettingsError::Invalid { field, value, constraint } => {
                assert_eq!(field, "api.port");
                assert_eq!(value, "70000");
                assert!(constraint.contains("65535"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(parse_port("api", "port", "-1"), Err(SettingsError::Invalid { .. })));
        assert!(matches!(parse_port("api", "port", "http"), Err(SettingsError::Parse { .. })));
        assert_eq!(parse_port("api", "port", " 8080 ").unwrap(), 8080);
    }

    #[test]
    fn negative_uint_is_parse_error() {
        let err = parse_uint::<u32>("llm", "max_tokens", "-1").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { ref field, .. } if field == "llm.max_tokens"));
    }

    #[test]
    fn nan_is_rejected() {
        assert!(parse_float("llm", "temperature", "NaN").is_err());
        assert_eq!(parse_float("llm", "temperature", "0.25").unwrap(), 0.25);
    }

    #[test]
    fn empty_secret_is_unset() {
        assert_eq!(parse_secret(""), None);
        assert_eq!(parse_secret("sk-1"), Some("sk-1".to_string()));
    }

    #[test]
    fn range_is_inclusive() {
        assert!(check_range("llm", "temperature", 0.0, 0.0, 2.0).is_ok());
        assert!(check_range("llm", "temperature", 2.0, 0.0, 2.0).is_ok());
        assert!(check_range("llm", "temperature", 2.1, 0.0, 2.0).is_err());
        assert!(check_range("llm", "temperature", -0.1, 0.0, 2.0).is_err());
    }

    #[test]
    fn root_paths_have_no_group() {
        assert_eq!(path("", "debug"), "debug");
        assert_eq!(path("redis", "port"), "redis.port");
    }
}
