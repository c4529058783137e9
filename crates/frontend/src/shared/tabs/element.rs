//! Custom-element bridge.
//!
//! Upgrades `demo-tabs` / `demo-tab` / `demo-panel` markup in place: ids and
//! roles for the children, a shadow root with the `tab` and `panel` slots for
//! the host, and event listeners that forward into the controller.

use super::dom::{DomNode, SlotDistribution};
use contracts::enums::Role;
use contracts::shared::config::TagNames;
use contracts::shared::tabs::{
    attr, KeyInput, KeyOutcome, PanelState, Slot, TabListController, TabNode, TabState,
};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Event, HtmlElement, HtmlSlotElement, KeyboardEvent, ShadowRoot};
use web_sys::{ShadowRootInit, ShadowRootMode};

pub type DomController = TabListController<SlotDistribution>;

const TEMPLATE: &str = r#"
<style>
    :host {
        display: flex;
        flex-wrap: wrap;
    }
    ::slotted([role="tabpanel"]) {
        flex-basis: 100%;
    }
</style>
<slot name="tab"></slot>
<slot name="panel"></slot>
"#;

/// Already carries its role and an id, i.e. was upgraded before.
fn is_upgraded(el: &HtmlElement, role: Role) -> bool {
    el.get_attribute(attr::ROLE).as_deref() == Some(role.code()) && !el.id().is_empty()
}

/// Gives a tab its id, role, selection attributes and slot.
pub fn upgrade_tab(el: &HtmlElement) {
    if is_upgraded(el, TabState::ROLE) {
        return;
    }
    let state = TabState::new(
        el.get_attribute(attr::ID).as_deref(),
        el.has_attribute(attr::SELECTED),
    );
    let node = DomNode(el.clone());
    for patch in state.initial_attributes() {
        node.apply(&patch);
    }
    if !el.has_attribute(attr::SLOT) {
        node.set_attribute(attr::SLOT, Slot::Tab.name());
    }
}

/// Gives a panel its id, role, `hidden` and slot.
pub fn upgrade_panel(el: &HtmlElement) {
    if is_upgraded(el, PanelState::ROLE) {
        return;
    }
    let state = PanelState::new(el.get_attribute(attr::ID).as_deref());
    let node = DomNode(el.clone());
    for patch in state.initial_attributes() {
        node.apply(&patch);
    }
    if !el.has_attribute(attr::SLOT) {
        node.set_attribute(attr::SLOT, Slot::Panel.name());
    }
}

/// Explicit `slot` attribute first, then the configured tag name.
fn slot_for(el: &HtmlElement, tags: &TagNames) -> Option<Slot> {
    if let Some(slot) = el.get_attribute(attr::SLOT) {
        return Slot::from_name(&slot);
    }
    let tag = el.tag_name().to_lowercase();
    if tag == tags.tab {
        Some(Slot::Tab)
    } else if tag == tags.panel {
        Some(Slot::Panel)
    } else {
        None
    }
}

fn upgrade_children(host: &HtmlElement, tags: &TagNames) {
    let children = host.children();
    for i in 0..children.length() {
        let Some(child) = children
            .item(i)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        match slot_for(&child, tags) {
            Some(Slot::Tab) => upgrade_tab(&child),
            Some(Slot::Panel) => upgrade_panel(&child),
            None => {}
        }
    }
}

fn find_slot(shadow: &ShadowRoot, slot: Slot) -> Result<HtmlSlotElement, JsValue> {
    shadow
        .query_selector(&format!("slot[name=\"{}\"]", slot.name()))?
        .ok_or_else(|| JsValue::from_str(&format!("slot `{}` missing from template", slot.name())))?
        .dyn_into::<HtmlSlotElement>()
        .map_err(JsValue::from)
}

fn event_target(event: &Event) -> Option<DomNode> {
    event
        .target()
        .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        .map(DomNode)
}

/// Upgrades one tab list host.
///
/// Returns `None` when the host already has a shadow root.
pub fn upgrade_tab_list(
    host: &HtmlElement,
    tags: &TagNames,
) -> Result<Option<Rc<DomController>>, JsValue> {
    if host.shadow_root().is_some() {
        return Ok(None);
    }

    upgrade_children(host, tags);

    let shadow = host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))?;
    shadow.set_inner_html(TEMPLATE);

    let distribution = SlotDistribution::new(
        host.clone(),
        find_slot(&shadow, Slot::Tab)?,
        find_slot(&shadow, Slot::Panel)?,
    );
    let controller = Rc::new(TabListController::new(distribution));
    controller.connect();

    wire_events(host, &controller)?;

    log::debug!("upgraded tab list #{}", host.id());
    Ok(Some(controller))
}

// Listeners live as long as the host; the closures are leaked on purpose
// and keep the controller alive through their `Rc`.
fn wire_events(host: &HtmlElement, controller: &Rc<DomController>) -> Result<(), JsValue> {
    let c = controller.clone();
    let on_click = Closure::wrap(Box::new(move |event: Event| {
        let Some(target) = event_target(&event) else {
            return;
        };
        if let Err(e) = c.handle_click(&target) {
            log::error!("tabs: click failed: {}", e);
        }
    }) as Box<dyn FnMut(_)>);
    host.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let c = controller.clone();
    let on_keydown = Closure::wrap(Box::new(move |event: Event| {
        let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let Some(target) = event_target(&event) else {
            return;
        };
        let key = keyboard_event.key();
        let input = KeyInput {
            target: &target,
            key: &key,
            key_code: keyboard_event.key_code(),
            alt_key: keyboard_event.alt_key(),
        };
        match c.handle_key(input) {
            Ok(KeyOutcome::Handled) => event.prevent_default(),
            Ok(KeyOutcome::Ignored) => {}
            Err(e) => log::error!("tabs: keydown '{}' failed: {}", key, e),
        }
    }) as Box<dyn FnMut(_)>);
    host.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();

    for slot in [Slot::Tab, Slot::Panel] {
        let c = controller.clone();
        let on_slot_change = Closure::wrap(Box::new(move |_event: Event| {
            for tab in c.tabs() {
                upgrade_tab(tab.element());
            }
            for panel in c.panels() {
                upgrade_panel(panel.element());
            }
            match c.link_panels() {
                Ok(report) => log::debug!(
                    "tabs: relinked, selected {:?}, skipped {:?}",
                    report.selected,
                    report.skipped
                ),
                Err(e) => log::error!("tabs: linking failed: {}", e),
            }
        }) as Box<dyn FnMut(_)>);
        controller
            .distribution()
            .slot(slot)
            .add_event_listener_with_callback("slotchange", on_slot_change.as_ref().unchecked_ref())?;
        on_slot_change.forget();
    }

    Ok(())
}

/// Upgrades every tab list in `document` that is not upgraded yet.
pub fn upgrade_all(document: &Document, tags: &TagNames) -> Result<usize, JsValue> {
    let hosts = document.query_selector_all(&tags.tab_list)?;
    let mut upgraded = 0;
    for i in 0..hosts.length() {
        let Some(host) = hosts
            .item(i)
            .and_then(|node| node.dyn_into::<HtmlElement>().ok())
        else {
            continue;
        };
        if upgrade_tab_list(&host, tags)?.is_some() {
            upgraded += 1;
        }
    }
    Ok(upgraded)
}
