//! Настройки виджета.
//!
//! Читаются из JSON; любое отсутствующее поле берётся по умолчанию.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tabs config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tag name `{0}`: custom element names must be lowercase and contain a hyphen")]
    InvalidTag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Имена пользовательских элементов
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagNames {
    pub tab_list: String,
    pub tab: String,
    pub panel: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            tab_list: "demo-tabs".to_string(),
            tab: "demo-tab".to_string(),
            panel: "demo-panel".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    pub tags: TagNames,
    pub log_level: LogLevel,
    /// Upgrade tab lists already present in the page markup on start.
    pub upgrade_on_start: bool,
    /// Mount the demo application into `<body>`.
    pub mount_demo: bool,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            tags: TagNames::default(),
            log_level: LogLevel::default(),
            upgrade_on_start: true,
            mount_demo: true,
        }
    }
}

impl TabsConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TabsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for tag in [&self.tags.tab_list, &self.tags.tab, &self.tags.panel] {
            if !is_custom_element_name(tag) {
                return Err(ConfigError::InvalidTag(tag.clone()));
            }
        }
        Ok(())
    }
}

fn is_custom_element_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_lowercase())
        && name.contains('-')
        && !name.chars().any(|c| c.is_ascii_uppercase() || c.is_whitespace())
}
