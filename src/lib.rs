//! Settings resolution and prompt templates for the chatbot.
//!
//! The binary entry point is `src/main.rs`.

pub mod error;
pub mod logger;
pub mod prompts;
pub mod settings;

pub use error::AppError;
pub use prompts::{PromptBuilder, PromptError, PromptRegistry};
pub use settings::{EnvSource, Overrides, Settings, SettingsError};
