//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.nyaya/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::services::Language;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NyayaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_language: Option<Language>,
    pub system_prompt: Option<String>,
    pub system_prompt_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub vision_model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TranslationConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UploadConfig {
    pub url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// ============================================================================
// Resolved Config (concrete values, few Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: Language,
    pub model_name: String,
    pub vision_model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub system_prompt: Option<String>,
    /// None = chat and vision run unconfigured.
    pub api_key: Option<String>,
    pub chat_base_url: String,
    pub translation_base_url: String,
    /// None = uploads fail as not configured.
    pub upload_url: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.nyaya/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".nyaya").join("config.toml"))
}

/// Load config from `~/.nyaya/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NyayaConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NyayaConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NyayaConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NyayaConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NyayaConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config.general);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Nyaya Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_language = "hi"            # "en", "hi", "bn", "te" or "mr"
# system_prompt = "You are a helpful Indian legal assistant."
# system_prompt_file = "system.md"   # Path relative to ~/.nyaya/

# [chat]
# api_key = "sk-..."                 # Or set NYAYA_API_KEY / OPENAI_API_KEY
# base_url = "https://api.openai.com/v1"
# model = "gpt-4o-mini"
# vision_model = "gpt-4o-mini"
# max_output_tokens = 500
# temperature = 0.7

# [translation]
# base_url = "https://api.mymemory.translated.net"

# [upload]
# url = "https://uploads.example.com/upload"   # Must answer {"url": "..."}
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_language` and `cli_model` are from CLI flags (None = not specified).
pub fn resolve(
    config: &NyayaConfig,
    cli_language: Option<Language>,
    cli_model: Option<&str>,
) -> ResolvedConfig {
    resolve_with_env(config, cli_language, cli_model, |key| std::env::var(key).ok())
}

/// `resolve` with the environment supplied as a lookup function.
fn resolve_with_env(
    config: &NyayaConfig,
    cli_language: Option<Language>,
    cli_model: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Language: CLI → env → config → default
    let language = cli_language
        .or_else(|| env("NYAYA_LANGUAGE").and_then(|code| Language::from_code(&code)))
        .or(config.general.default_language)
        .unwrap_or_default();

    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| env("NYAYA_MODEL"))
        .or_else(|| config.chat.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → legacy env → config. Blank values don't shadow later layers.
    let present = |key: &String| !key.trim().is_empty();
    let api_key = env("NYAYA_API_KEY")
        .filter(present)
        .or_else(|| env("OPENAI_API_KEY").filter(present))
        .or_else(|| config.chat.api_key.clone().filter(present));

    let chat_base_url = env("NYAYA_CHAT_BASE_URL")
        .or_else(|| config.chat.base_url.clone())
        .unwrap_or_else(|| crate::services::providers::openai::DEFAULT_BASE_URL.to_string());

    let translation_base_url = env("NYAYA_TRANSLATION_BASE_URL")
        .or_else(|| config.translation.base_url.clone())
        .unwrap_or_else(|| crate::services::providers::mymemory::DEFAULT_BASE_URL.to_string());

    let upload_url = env("NYAYA_UPLOAD_URL")
        .or_else(|| config.upload.url.clone())
        .filter(|url| !url.trim().is_empty());

    ResolvedConfig {
        language,
        model_name,
        vision_model: config
            .chat
            .vision_model
            .clone()
            .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
        max_output_tokens: config
            .chat
            .max_output_tokens
            .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        temperature: config.chat.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        system_prompt: resolve_system_prompt(config),
        api_key,
        chat_base_url,
        translation_base_url,
        upload_url,
    }
}

/// Resolves the system prompt: inline wins over file. No prompt by default,
/// the transcript greeting sets the tone.
fn resolve_system_prompt(config: &NyayaConfig) -> Option<String> {
    if let Some(ref prompt) = config.general.system_prompt {
        return Some(prompt.clone());
    }

    let file = config.general.system_prompt_file.as_ref()?;
    let prompt_path = dirs::home_dir()?.join(".nyaya").join(file);
    match fs::read_to_string(&prompt_path) {
        Ok(contents) => {
            let trimmed = contents.trim().to_string();
            if trimmed.is_empty() {
                warn!("System prompt file is empty: {}", prompt_path.display());
                return None;
            }
            info!("Loaded system prompt from {}", prompt_path.display());
            Some(trimmed)
        }
        Err(e) => {
            warn!(
                "Failed to read system prompt file {}: {}",
                prompt_path.display(),
                e
            );
            None
        }
    }
}
