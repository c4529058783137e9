//! Локальное состояние вкладки и панели.
//!
//! Вкладка и панель владеют только своими атрибутами. Связи между ними
//! (`aria-controls` / `aria-labelledby`) проставляет контроллер списка.

use super::ids::{explicit_or, next_panel_id, next_tab_id};
use crate::enums::Role;

/// Имена атрибутов, которые виджет читает и пишет
pub mod attr {
    pub const ID: &str = "id";
    pub const ROLE: &str = "role";
    pub const SLOT: &str = "slot";
    pub const SELECTED: &str = "selected";
    pub const HIDDEN: &str = "hidden";
    pub const TABINDEX: &str = "tabindex";
    pub const ARIA_SELECTED: &str = "aria-selected";
    pub const ARIA_CONTROLS: &str = "aria-controls";
    pub const ARIA_LABELLEDBY: &str = "aria-labelledby";
}

/// One attribute write. `None` removes the attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPatch {
    pub name: &'static str,
    pub value: Option<String>,
}

impl AttrPatch {
    pub fn set(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: Some(value.into()),
        }
    }

    pub fn remove(name: &'static str) -> Self {
        Self { name, value: None }
    }
}

fn aria_selected_for(selected: bool) -> &'static str {
    if selected {
        "true"
    } else {
        "false"
    }
}

fn tab_index_for(selected: bool) -> i32 {
    if selected {
        0
    } else {
        -1
    }
}

/// Состояние вкладки.
///
/// `selected` is the single source of truth. The `selected` marker,
/// `aria-selected` and `tabindex` are derived from it on every write and are
/// never read back into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    id: String,
    selected: bool,
}

impl TabState {
    pub const ROLE: Role = Role::Tab;

    /// Creates the state on first initialization. A missing or blank id is
    /// replaced by the next `tab-generated-<n>`.
    pub fn new(explicit_id: Option<&str>, selected: bool) -> Self {
        Self {
            id: explicit_or(explicit_id, next_tab_id),
            selected,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    /// Updates the flag and returns the attribute writes that mirror it.
    pub fn set_selected(&mut self, selected: bool) -> [AttrPatch; 3] {
        self.selected = selected;
        Self::reflect_selected(selected)
    }

    pub fn aria_selected(&self) -> &'static str {
        aria_selected_for(self.selected)
    }

    /// Roving tabindex: only the selected tab takes part in sequential focus.
    pub fn tab_index(&self) -> i32 {
        tab_index_for(self.selected)
    }

    /// Attribute writes mirroring `selected`, derived the same way as
    /// [`aria_selected`](Self::aria_selected) and [`tab_index`](Self::tab_index).
    pub fn reflect_selected(selected: bool) -> [AttrPatch; 3] {
        let marker = if selected {
            AttrPatch::set(attr::SELECTED, "")
        } else {
            AttrPatch::remove(attr::SELECTED)
        };
        [
            marker,
            AttrPatch::set(attr::ARIA_SELECTED, aria_selected_for(selected)),
            AttrPatch::set(attr::TABINDEX, tab_index_for(selected).to_string()),
        ]
    }

    /// All attributes a freshly upgraded tab element carries.
    pub fn initial_attributes(&self) -> Vec<AttrPatch> {
        let mut patches = vec![
            AttrPatch::set(attr::ID, self.id.clone()),
            AttrPatch::set(attr::ROLE, Self::ROLE.code()),
        ];
        patches.extend(Self::reflect_selected(self.selected));
        patches
    }
}

/// Состояние панели. Панель пассивна: её меняет только контроллер.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    id: String,
    hidden: bool,
}

impl PanelState {
    pub const ROLE: Role = Role::TabPanel;

    /// Panels start hidden until they are linked and their tab is selected.
    pub fn new(explicit_id: Option<&str>) -> Self {
        Self {
            id: explicit_or(explicit_id, next_panel_id),
            hidden: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) -> AttrPatch {
        self.hidden = hidden;
        Self::reflect_hidden(hidden)
    }

    pub fn reflect_hidden(hidden: bool) -> AttrPatch {
        if hidden {
            AttrPatch::set(attr::HIDDEN, "")
        } else {
            AttrPatch::remove(attr::HIDDEN)
        }
    }

    pub fn initial_attributes(&self) -> Vec<AttrPatch> {
        vec![
            AttrPatch::set(attr::ID, self.id.clone()),
            AttrPatch::set(attr::ROLE, Self::ROLE.code()),
            Self::reflect_hidden(self.hidden),
        ]
    }
}
