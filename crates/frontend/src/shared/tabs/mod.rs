//! Tabs widget for the browser: DOM adapter, custom-element bridge and
//! Leptos components.

pub mod components;
pub mod dom;
pub mod element;

pub use components::{Panel, Tab, TabList};
pub use element::{upgrade_all, upgrade_tab_list, DomController};
