//! chatbot-config: resolve and report the chatbot's settings.
//!
//! Startup sequence:
//!   1. Snapshot the env file (default `.env`, if present) and the process env
//!   2. Resolve and validate settings
//!   3. Init logger from the `log` settings group
//!   4. Build the prompt registry and check every template parses
//!   5. Print the settings (secrets omitted) and exit

use std::path::PathBuf;

use chatbot_config::{AppError, Overrides, PromptRegistry, logger, settings};
use tracing::{debug, info};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let env_file = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".env"));

    let settings = settings::load(Some(&env_file), &Overrides::new())?;

    logger::init_from_settings(&settings.log)?;
    debug!(
        env_file = %env_file.display(),
        present = env_file.is_file(),
        "env file checked"
    );

    info!(
        app_name = %settings.app_name,
        app_version = %settings.app_version,
        environment = %settings.environment,
        llm_provider = %settings.llm.default_llm_provider,
        db_type = %settings.database.db_type,
        "settings resolved"
    );

    let prompts = PromptRegistry::new();
    for name in prompts.names() {
        let placeholders = prompts.placeholders(name)?;
        debug!(template = name, ?placeholders, "template parsed");
    }
    info!(templates = prompts.len(), "prompt registry ready");

    println!("{}", serde_json::to_string_pretty(&settings)?);

    Ok(())
}
