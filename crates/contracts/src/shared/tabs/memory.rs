//! In-memory element model.
//!
//! A minimal light DOM for a single tab list: ordered children with
//! attributes, slot assignment by the `slot` attribute and a focus pointer.
//! Used to drive [`TabListController`](super::TabListController) without a
//! browser, in tests and for headless rendering.

use super::distribution::{ContentDistribution, Slot, TabNode};
use super::state::{attr, AttrPatch, PanelState, TabState};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

#[derive(Debug, Default)]
struct HostData {
    children: Vec<MemoryNode>,
    focused: Option<String>,
}

#[derive(Debug)]
enum NodeKind {
    Tab(TabState),
    Panel(PanelState),
    Plain,
}

#[derive(Debug)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    kind: NodeKind,
    parent: Weak<RefCell<HostData>>,
}

/// Tag and attributes of a node at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl MemoryNode {
    fn with_kind(tag: &str, kind: NodeKind, initial: Vec<AttrPatch>) -> Self {
        let node = Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
            kind,
            parent: Weak::new(),
        })));
        for patch in &initial {
            node.apply(patch);
        }
        node
    }

    /// Plain element without tab semantics.
    pub fn element(tag: &str) -> Self {
        Self::with_kind(tag, NodeKind::Plain, Vec::new())
    }

    /// Upgraded tab assigned to the `tab` slot.
    pub fn tab(id: Option<&str>) -> Self {
        let state = TabState::new(id, false);
        let mut initial = state.initial_attributes();
        initial.push(AttrPatch::set(attr::SLOT, Slot::Tab.name()));
        Self::with_kind("demo-tab", NodeKind::Tab(state), initial)
    }

    /// Upgraded panel assigned to the `panel` slot.
    pub fn panel(id: Option<&str>) -> Self {
        let state = PanelState::new(id);
        let mut initial = state.initial_attributes();
        initial.push(AttrPatch::set(attr::SLOT, Slot::Panel.name()));
        Self::with_kind("demo-panel", NodeKind::Panel(state), initial)
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        let data = self.0.borrow();
        NodeSnapshot {
            tag: data.tag.clone(),
            attributes: data.attributes.clone(),
        }
    }

    fn ptr_eq(&self, other: &MemoryNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn parent(&self) -> Option<Rc<RefCell<HostData>>> {
        self.0.borrow().parent.upgrade()
    }
}

impl TabNode for MemoryNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    fn next_element_sibling(&self) -> Option<Self> {
        let parent = self.parent()?;
        let parent = parent.borrow();
        let idx = parent.children.iter().position(|c| c.ptr_eq(self))?;
        parent.children.get(idx + 1).cloned()
    }

    fn is_selected(&self) -> bool {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Tab(state) => state.selected(),
            _ => data.attributes.contains_key(attr::SELECTED),
        }
    }

    fn set_selected(&self, selected: bool) {
        let patches = match &mut self.0.borrow_mut().kind {
            NodeKind::Tab(state) => state.set_selected(selected),
            _ => TabState::reflect_selected(selected),
        };
        for patch in &patches {
            self.apply(patch);
        }
    }

    fn set_hidden(&self, hidden: bool) {
        let patch = match &mut self.0.borrow_mut().kind {
            NodeKind::Panel(state) => state.set_hidden(hidden),
            _ => PanelState::reflect_hidden(hidden),
        };
        self.apply(&patch);
    }

    fn focus(&self) {
        let id = self.id();
        if let Some(parent) = self.parent() {
            parent.borrow_mut().focused = Some(id);
        }
    }
}

/// Tab list host with its light-DOM children.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    node: MemoryNode,
    inner: Rc<RefCell<HostData>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            node: MemoryNode::element("demo-tabs"),
            inner: Rc::new(RefCell::new(HostData::default())),
        }
    }

    pub fn append(&self, node: &MemoryNode) {
        node.0.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(node.clone());
    }

    pub fn remove(&self, node: &MemoryNode) {
        self.inner.borrow_mut().children.retain(|c| !c.ptr_eq(node));
        node.0.borrow_mut().parent = Weak::new();
    }

    /// Id of the element that received focus last.
    pub fn focused(&self) -> Option<String> {
        self.inner.borrow().focused.clone()
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentDistribution for MemoryHost {
    type Node = MemoryNode;

    fn host(&self) -> MemoryNode {
        self.node.clone()
    }

    fn assigned(&self, slot: Slot) -> Vec<MemoryNode> {
        self.inner
            .borrow()
            .children
            .iter()
            .filter(|c| c.attribute(attr::SLOT).as_deref() == Some(slot.name()))
            .cloned()
            .collect()
    }
}
