//! Prompt template registry.
//!
//! A fixed catalog of named templates (see `templates.rs`) and safe
//! placeholder substitution. There is no runtime registration: the registry
//! maps names to the compiled-in catalog and lookups fail closed.
//!
//! ```
//! use chatbot_config::prompts::PromptRegistry;
//!
//! let prompts = PromptRegistry::new();
//! let text = prompts
//!     .prompt("ENTITY_EXTRACTION")?
//!     .var("user_input", "weather in Oslo tomorrow")
//!     .var("intent", "query")
//!     .build()?;
//! assert!(text.contains("weather in Oslo tomorrow"));
//! # Ok::<(), chatbot_config::prompts::PromptError>(())
//! ```

mod render;
pub mod templates;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

// ── Error ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template {template} is missing variable: {placeholder}")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("malformed template {template} at byte {offset}: {reason}")]
    Malformed {
        template: String,
        offset: usize,
        reason: &'static str,
    },
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Name → template lookup over the fixed catalog.
#[derive(Debug, Clone)]
pub struct PromptRegistry {
    templates: HashMap<&'static str, &'static str>,
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self {
            templates: templates::CATALOG.iter().copied().collect(),
        }
    }

    /// Raw template text for `name`.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.templates.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// All template names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.templates.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Distinct placeholder names of `name`, in order of first occurrence.
    pub fn placeholders(&self, name: &str) -> Result<Vec<&'static str>, PromptError> {
        let template = self.lookup(name)?;
        render::placeholders(name, template)
    }

    /// Start a fluent build of template `name`.
    pub fn prompt(&self, name: &str) -> Result<PromptBuilder, PromptError> {
        let template = self.lookup(name)?;
        Ok(PromptBuilder {
            name: name.to_string(),
            template,
            vars: HashMap::new(),
        })
    }

    /// Fill template `name` from `vars`.
    ///
    /// Every placeholder must be bound; extra variables are ignored.
    pub fn build<'a, I>(&self, name: &str, vars: I) -> Result<String, PromptError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.prompt(name)?.with_vars(vars).build()
    }

    /// Merge `defaults` then `overrides` (override wins) and build.
    /// `None` defaults behave like an empty map.
    pub fn build_with_defaults(
        &self,
        name: &str,
        defaults: Option<&HashMap<String, String>>,
        overrides: &HashMap<String, String>,
    ) -> Result<String, PromptError> {
        let mut merged: HashMap<&str, &str> = HashMap::new();
        for (k, v) in defaults.into_iter().flatten().chain(overrides) {
            merged.insert(k, v);
        }
        self.build(name, merged)
    }

    fn lookup(&self, name: &str) -> Result<&'static str, PromptError> {
        self.get(name)
            .ok_or_else(|| PromptError::UnknownTemplate(name.to_string()))
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Collects variables for one template, then renders it with [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    name: String,
    template: &'static str,
    vars: HashMap<String, String>,
}

impl PromptBuilder {
    /// Register `{key}` → `value` substitution pairs.
    pub fn with_vars<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (k, v) in vars {
            self.vars.insert(k.to_string(), v.to_string());
        }
        self
    }

    /// Register a single variable. Convenience wrapper around [`with_vars`](Self::with_vars).
    pub fn var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.vars.insert(key.to_string(), value.into());
        self
    }

    /// Substitute all placeholders.
    pub fn build(self) -> Result<String, PromptError> {
        let vars: HashMap<&str, &str> = self
            .vars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        let prompt = render::render(&self.name, self.template, &vars)?;
        debug!(template = %self.name, vars = vars.len(), len = prompt.len(), "prompt built");
        Ok(prompt)
    }
}
