pub mod app;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn hydrate() {
    let loaded = shared::config::load_config();
    let level = loaded
        .as_ref()
        .map(|c| c.log_level)
        .unwrap_or_default()
        .to_level();

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("{}; using default configuration", e);
        Default::default()
    });
    shared::config::install(config);
    let config = shared::config::config();

    if config.upgrade_on_start {
        match upgrade_tabs() {
            Ok(n) => log::debug!("upgraded {} tab list(s) from markup", n),
            Err(e) => log::error!("upgrading tab lists failed: {:?}", e),
        }
    }

    if config.mount_demo {
        leptos::mount::mount_to_body(app::App);
    }
}

/// Upgrades tab lists present in the document that are not upgraded yet.
///
/// Safe to call repeatedly, e.g. after inserting markup from JavaScript.
#[wasm_bindgen]
pub fn upgrade_tabs() -> Result<usize, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    shared::tabs::upgrade_all(&document, &shared::config::config().tags)
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
