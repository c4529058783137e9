//! Контракты виджета вкладок: роли, клавиши навигации, локальное состояние
//! вкладок и панелей и машина состояний списка вкладок.
//!
//! Крейт не зависит от DOM и собирается как для wasm, так и нативно.

pub mod enums;
pub mod shared;
