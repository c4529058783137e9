//! web-sys adapter for the tab list state machine.
//!
//! `DomNode` wraps a live `HtmlElement`; `SlotDistribution` reads the
//! assigned elements of the two shadow-root slots on every call.

use contracts::shared::tabs::{
    attr, ContentDistribution, PanelState, Slot, TabNode, TabState,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlSlotElement};

/// Live element handle.
///
/// The browser keeps no Rust-side `TabState` per element, so here the
/// `selected` marker attribute is what `is_selected` reads. It is written
/// only by `set_selected` from the flag passed in, which keeps it in step
/// with the flag the controller decided on.
#[derive(Debug, Clone, PartialEq)]
pub struct DomNode(pub HtmlElement);

impl DomNode {
    pub fn element(&self) -> &HtmlElement {
        &self.0
    }
}

impl TabNode for DomNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            log::warn!("set_attribute({}) failed: {:?}", name, e);
        }
    }

    fn remove_attribute(&self, name: &str) {
        if let Err(e) = self.0.remove_attribute(name) {
            log::warn!("remove_attribute({}) failed: {:?}", name, e);
        }
    }

    fn next_element_sibling(&self) -> Option<Self> {
        self.0
            .next_element_sibling()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(DomNode)
    }

    fn is_selected(&self) -> bool {
        self.0.has_attribute(attr::SELECTED)
    }

    // The marker is only ever written here, from the flag passed in; nothing
    // observes the attribute, so there is no path back into this setter.
    fn set_selected(&self, selected: bool) {
        for patch in &TabState::reflect_selected(selected) {
            self.apply(patch);
        }
    }

    fn set_hidden(&self, hidden: bool) {
        self.apply(&PanelState::reflect_hidden(hidden));
    }

    fn focus(&self) {
        if let Err(e) = self.0.focus() {
            log::warn!("focus #{} failed: {:?}", self.0.id(), e);
        }
    }
}

/// Content distribution of one `demo-tabs` host.
#[derive(Debug, Clone)]
pub struct SlotDistribution {
    host: HtmlElement,
    tab_slot: HtmlSlotElement,
    panel_slot: HtmlSlotElement,
}

impl SlotDistribution {
    pub fn new(host: HtmlElement, tab_slot: HtmlSlotElement, panel_slot: HtmlSlotElement) -> Self {
        Self {
            host,
            tab_slot,
            panel_slot,
        }
    }

    pub fn slot(&self, slot: Slot) -> &HtmlSlotElement {
        match slot {
            Slot::Tab => &self.tab_slot,
            Slot::Panel => &self.panel_slot,
        }
    }
}

impl ContentDistribution for SlotDistribution {
    type Node = DomNode;

    fn host(&self) -> DomNode {
        DomNode(self.host.clone())
    }

    fn assigned(&self, slot: Slot) -> Vec<DomNode> {
        self.slot(slot)
            .assigned_nodes()
            .iter()
            .filter_map(|value| value.dyn_into::<HtmlElement>().ok())
            .map(DomNode)
            .collect()
    }
}
