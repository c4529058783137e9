//! Загрузка настроек виджета со страницы.
//!
//! The page may carry `<script type="application/json" id="tabs-config">`;
//! without it the defaults apply.

use contracts::shared::config::{ConfigError, TabsConfig};
use once_cell::sync::OnceCell;

const CONFIG_ELEMENT_ID: &str = "tabs-config";

static CONFIG: OnceCell<TabsConfig> = OnceCell::new();

/// Reads the config element of the current document.
pub fn load_config() -> Result<TabsConfig, ConfigError> {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());

    match json {
        Some(json) if !json.trim().is_empty() => TabsConfig::from_json(&json),
        _ => Ok(TabsConfig::default()),
    }
}

/// Makes `config` the process-wide configuration. Later calls are ignored.
pub fn install(config: TabsConfig) {
    if CONFIG.set(config).is_err() {
        log::warn!("tabs config already installed, ignoring");
    }
}

pub fn config() -> &'static TabsConfig {
    CONFIG.get_or_init(TabsConfig::default)
}
