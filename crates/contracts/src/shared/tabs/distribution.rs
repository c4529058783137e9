//! Abstraction over content distribution.
//!
//! The tab list never owns its children. It asks the host which elements are
//! currently assigned to each named slot and works on handles to them.

use super::state::{attr, AttrPatch};
use crate::enums::Role;

/// Named slots of the tab list template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Tab,
    Panel,
}

impl Slot {
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Tab => "tab",
            Slot::Panel => "panel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tab" => Some(Slot::Tab),
            "panel" => Some(Slot::Panel),
            _ => None,
        }
    }
}

/// Handle to an element taking part in the widget.
///
/// Handles are cheap to clone and mutate through `&self`, the same way DOM
/// element handles do.
pub trait TabNode: Clone {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    /// Next element in light-DOM order, regardless of its slot.
    fn next_element_sibling(&self) -> Option<Self>;

    fn is_selected(&self) -> bool;
    fn set_selected(&self, selected: bool);
    fn set_hidden(&self, hidden: bool);
    fn focus(&self);

    fn id(&self) -> String {
        self.attribute(attr::ID).unwrap_or_default()
    }

    fn role(&self) -> Option<Role> {
        self.attribute(attr::ROLE)
            .and_then(|role| Role::from_code(&role))
    }

    fn apply(&self, patch: &AttrPatch) {
        match &patch.value {
            Some(value) => self.set_attribute(patch.name, value),
            None => self.remove_attribute(patch.name),
        }
    }
}

/// Queryable content distribution of one tab list instance.
pub trait ContentDistribution {
    type Node: TabNode;

    /// The tab list element itself.
    fn host(&self) -> Self::Node;

    /// Elements currently assigned to `slot`, in document order.
    fn assigned(&self, slot: Slot) -> Vec<Self::Node>;
}
