//! HelpClaw configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpClawConfig {
    #[serde(default)]
    pub tickets: TicketSystemConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for HelpClawConfig {
    fn default() -> Self {
        Self {
            tickets: TicketSystemConfig::default(),
            knowledge: KnowledgeConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl HelpClawConfig {
    /// Load config from the default path (~/.helpclaw/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::HelpClawError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| crate::error::HelpClawError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::HelpClawError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".helpclaw")
            .join("config.toml")
    }

    /// Get the HelpClaw home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".helpclaw")
    }

    /// Credentials from the environment win over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(username) = std::env::var("HELPCLAW_TICKET_USERNAME") {
            self.tickets.username = Some(username);
        }
        if let Ok(token) = std::env::var("HELPCLAW_TICKET_TOKEN") {
            self.tickets.api_token = Some(token);
        }
        if let Ok(url) = std::env::var("HELPCLAW_TICKET_URL") {
            self.tickets.url = url;
        }
    }
}

/// Ticket system (Jira-style) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketSystemConfig {
    #[serde(default = "default_ticket_url")]
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub api_token: Option<String>,
    /// Local ticket cache used when API credentials are absent.
    #[serde(default = "default_tickets_file")]
    pub local_file: String,
}

fn default_ticket_url() -> String { "https://api.jira.com".into() }
fn default_tickets_file() -> String { "data/tickets.json".into() }

impl Default for TicketSystemConfig {
    fn default() -> Self {
        Self {
            url: default_ticket_url(),
            username: None,
            api_token: None,
            local_file: default_tickets_file(),
        }
    }
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Directory of article JSON files.
    #[serde(default = "default_kb_path")]
    pub base_path: String,
}

fn default_kb_path() -> String { "data/knowledge_base".into() }

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self { base_path: default_kb_path() }
    }
}

/// Search tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_min_score")]
    pub min_score: f64,
}

fn default_max_results() -> usize { 5 }
fn default_min_score() -> f64 { 0.1 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            min_score: default_min_score(),
        }
    }
}
