//! Генерация идентификаторов вкладок и панелей.
//!
//! Один счётчик на каждый вид элемента, общий для всех списков вкладок
//! на странице. Счётчики только растут, поэтому идентификаторы не повторяются
//! за время жизни процесса.

use std::sync::atomic::{AtomicUsize, Ordering};

pub const TAB_ID_PREFIX: &str = "tab-generated-";
pub const PANEL_ID_PREFIX: &str = "panel-generated-";
pub const TAB_LIST_ID_PREFIX: &str = "tabs-generated-";

static TAB_COUNTER: AtomicUsize = AtomicUsize::new(0);
static PANEL_COUNTER: AtomicUsize = AtomicUsize::new(0);
static TAB_LIST_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Next `tab-generated-<n>` identifier.
pub fn next_tab_id() -> String {
    format!("{}{}", TAB_ID_PREFIX, TAB_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Next `panel-generated-<n>` identifier.
pub fn next_panel_id() -> String {
    format!("{}{}", PANEL_ID_PREFIX, PANEL_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Next `tabs-generated-<n>` identifier for tab list hosts.
pub fn next_tab_list_id() -> String {
    format!("{}{}", TAB_LIST_ID_PREFIX, TAB_LIST_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Returns the explicit id when it is present and non-blank, otherwise calls `generate`.
pub fn explicit_or(explicit: Option<&str>, generate: fn() -> String) -> String {
    match explicit.map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => generate(),
    }
}
