//! Вкладки: состояние элементов и контроллер списка

mod controller;
mod distribution;
mod error;
pub mod ids;
pub mod memory;
mod state;

pub use controller::{KeyInput, KeyOutcome, LinkReport, TabListController};
pub use distribution::{ContentDistribution, Slot, TabNode};
pub use error::TabsError;
pub use state::{attr, AttrPatch, PanelState, TabState};
