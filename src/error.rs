//! Application-wide error types.

use thiserror::Error;

use crate::prompts::PromptError;
use crate::settings::SettingsError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn settings_error_converts() {
        let e: AppError = SettingsError::UnknownField("llm.temprature".into()).into();
        assert!(e.to_string().starts_with("settings error"));
        assert!(e.to_string().contains("llm.temprature"));
    }

    #[test]
    fn prompt_error_converts() {
        let e: AppError = PromptError::UnknownTemplate("NOPE".into()).into();
        assert!(e.to_string().contains("prompt error"));
        assert!(e.to_string().contains("NOPE"));
    }

    #[test]
    fn logger_error_display() {
        let e = AppError::Logger("already initialized".into());
        assert!(e.to_string().contains("already initialized"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let e: AppError = io_err.into();
        assert!(e.to_string().contains("io error"));
        // satisfies std::error::Error trait
        let _: &dyn Error = &e;
    }
}
