//! Leptos components rendering the tabs custom elements.
//!
//! ```text
//! <TabList>
//!     <Tab>"First"</Tab>   <Panel>"..."</Panel>
//!     <Tab>"Second"</Tab>  <Panel>"..."</Panel>
//! </TabList>
//! ```
//!
//! Each `Tab` must be immediately followed by its `Panel`.

use super::element::upgrade_tab_list;
use crate::shared::config::config;
use contracts::shared::tabs::ids;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Контейнер вкладок (`demo-tabs`).
///
/// Upgrades itself once mounted; from then on the slot-change notification
/// keeps the tab/panel links up to date.
#[component]
pub fn TabList(
    /// Host id; generated when absent
    #[prop(optional, into)]
    id: Option<String>,
    /// Overrides the default `tablist` role
    #[prop(optional, into)]
    role: Option<String>,
    children: Children,
) -> impl IntoView {
    let host_id = ids::explicit_or(id.as_deref(), ids::next_tab_list_id);
    let host_id_for_upgrade = host_id.clone();

    Effect::new(move |_| {
        let host = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&host_id_for_upgrade))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let Some(host) = host else {
            log::warn!("TabList #{} is not mounted", host_id_for_upgrade);
            return;
        };
        if let Err(e) = upgrade_tab_list(&host, &config().tags) {
            log::error!("TabList #{}: upgrade failed: {:?}", host_id_for_upgrade, e);
        }
    });

    view! {
        <demo-tabs id=host_id role=role>
            {children()}
        </demo-tabs>
    }
}

/// Вкладка (`demo-tab`)
#[component]
pub fn Tab(
    #[prop(optional, into)]
    id: Option<String>,
    /// Pre-selects this tab on the first linking pass
    #[prop(optional)]
    selected: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <demo-tab id=id slot="tab" selected=selected>
            {children()}
        </demo-tab>
    }
}

/// Панель вкладки (`demo-panel`)
#[component]
pub fn Panel(
    #[prop(optional, into)]
    id: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <demo-panel id=id slot="panel" hidden=true>
            {children()}
        </demo-panel>
    }
}
