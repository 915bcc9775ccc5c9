use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::completion::AVAILABLE_MODELS;
use crate::error::{CaptionError, Result};
use crate::session::DEFAULT_IDLE_TTL_MINUTES;

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const PLACEHOLDER_API_KEY: &str = "PLACEHOLDER_GROQ_API_KEY";

/// Main configuration structure for the caption generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub groq: GroqConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
    /// Address the HTTP server binds to (host:port)
    pub bind: String,
    /// Minutes of inactivity after which a session is dropped
    pub session_idle_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroqConfig {
    #[serde(skip_serializing)]
    pub api_key: String,
    pub api_url: String,
    /// Model preselected in the sidebar; must be one of the available models
    pub model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Social Caption Generator".to_string(),
            bind: "127.0.0.1:8501".to_string(),
            session_idle_minutes: DEFAULT_IDLE_TTL_MINUTES,
        }
    }
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_GROQ_API_URL.to_string(),
            model: AVAILABLE_MODELS[0].to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Never fails; call [`Config::validate`] and [`Config::api_key`] before serving.
    pub fn load() -> Self {
        let env_paths = [".env", "../.env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::debug!("No .env file found - continuing with env vars only");
        }

        let config_path =
            env::var("CAPTION_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path)
                .map_err(|e| CaptionError::Config(e.to_string()))
                .and_then(|contents| Self::from_yaml(&contents))
            {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path);
                    config
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to load config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::info!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(bind) = lookup("CAPTION_HTTP_BIND") {
            self.server.bind = bind;
        }
        if let Some(minutes) = lookup("CAPTION_SESSION_IDLE_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.server.session_idle_minutes = minutes;
            }
        }
        if let Some(api_key) = lookup("GROQ_API_KEY") {
            self.groq.api_key = api_key;
        }
        if let Some(api_url) = lookup("GROQ_API_URL") {
            self.groq.api_url = api_url;
        }
        if let Some(model) = lookup("GROQ_MODEL") {
            self.groq.model = model;
        }
    }

    /// Validate the non-secret parts of the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if !AVAILABLE_MODELS.contains(&self.groq.model.as_str()) {
            return Err(CaptionError::Config(format!(
                "Model '{}' is not available (expected one of: {})",
                self.groq.model,
                AVAILABLE_MODELS.join(", ")
            )));
        }

        if self.server.session_idle_minutes <= 0 {
            return Err(CaptionError::Config(
                "server.session_idle_minutes must be positive".into(),
            ));
        }

        if self.groq.api_url.trim().is_empty() {
            return Err(CaptionError::Config("groq.api_url cannot be empty".into()));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            CaptionError::Config(format!(
                "Invalid bind address '{}' (expected host:port)",
                self.server.bind
            ))
        })
    }

    pub fn session_idle(&self) -> Duration {
        Duration::minutes(self.server.session_idle_minutes)
    }

    /// The Groq credential. Startup halts when this is missing.
    pub fn api_key(&self) -> Result<&str> {
        let key = self.groq.api_key.trim();
        if key.is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(CaptionError::MissingApiKey);
        }
        Ok(key)
    }
}
