//! Машина состояний списка вкладок.
//!
//! Контроллер находит вкладки и панели через распределение контента,
//! связывает их идентификаторами, хранит выбор и реагирует на клик и клавиатуру.
//! Все операции синхронные и выполняются целиком внутри одного обработчика события.

use super::distribution::{ContentDistribution, Slot, TabNode};
use super::error::TabsError;
use super::state::attr;
use crate::enums::{NavKey, Role};
use std::cell::Cell;

/// Результат одного прохода связывания
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// Linked `(tab id, panel id)` pairs in tab order.
    pub linked: Vec<(String, String)>,
    /// Ids of tabs whose next sibling is not a panel.
    pub skipped: Vec<String>,
    /// Id of the tab selected at the end of the pass.
    pub selected: Option<String>,
}

/// Keyboard event forwarded from the host.
#[derive(Debug, Clone)]
pub struct KeyInput<'a, N> {
    pub target: &'a N,
    /// `KeyboardEvent.key`
    pub key: &'a str,
    /// `KeyboardEvent.keyCode`, used when `key` is not recognized.
    pub key_code: u32,
    pub alt_key: bool,
}

/// What the host should do with the original keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Leave the default browser action alone.
    Ignored,
    /// The key selected a tab; suppress the default browser action.
    Handled,
}

pub struct TabListController<D: ContentDistribution> {
    distribution: D,
    selecting: Cell<bool>,
}

/// Clears the in-progress flag when the selection ends, including on error.
struct SelectionGuard<'a>(&'a Cell<bool>);

impl Drop for SelectionGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<D: ContentDistribution> TabListController<D> {
    pub fn new(distribution: D) -> Self {
        Self {
            distribution,
            selecting: Cell::new(false),
        }
    }

    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    /// Первичная настройка хоста: роль `tablist`, если она не задана снаружи.
    pub fn connect(&self) {
        let host = self.distribution.host();
        if host.attribute(attr::ROLE).is_none() {
            host.set_attribute(attr::ROLE, Role::TabList.code());
        }
    }

    pub fn tabs(&self) -> Vec<D::Node> {
        self.distribution.assigned(Slot::Tab)
    }

    pub fn panels(&self) -> Vec<D::Node> {
        self.distribution.assigned(Slot::Panel)
    }

    pub fn selected_tab(&self) -> Option<D::Node> {
        self.tabs().into_iter().find(|tab| tab.is_selected())
    }

    /// Recomputes the tab/panel association and selects a tab.
    ///
    /// Every tab must be immediately followed by its panel. A tab that is not
    /// is logged and skipped; the rest still link. The first tab already
    /// marked selected wins, otherwise the first tab.
    pub fn link_panels(&self) -> Result<LinkReport, TabsError> {
        let tabs = self.tabs();
        let mut report = LinkReport::default();

        for tab in &tabs {
            let tab_id = tab.id();
            let panel = tab
                .next_element_sibling()
                .filter(|sibling| sibling.role() == Some(Role::TabPanel));

            let Some(panel) = panel else {
                log::error!("Tab #{} is not a sibling of a tab panel", tab_id);
                tab.remove_attribute(attr::ARIA_CONTROLS);
                report.skipped.push(tab_id);
                continue;
            };

            let panel_id = panel.id();
            tab.set_attribute(attr::ARIA_CONTROLS, &panel_id);
            panel.set_attribute(attr::ARIA_LABELLEDBY, &tab_id);
            report.linked.push((tab_id, panel_id));
        }

        let Some(selected) = tabs
            .iter()
            .find(|tab| tab.is_selected())
            .or_else(|| tabs.first())
        else {
            log::debug!("link_panels: no tabs distributed, nothing to select");
            return Ok(report);
        };

        log::debug!(
            "link_panels: {} linked, {} skipped",
            report.linked.len(),
            report.skipped.len()
        );

        self.select_tab(selected)?;
        report.selected = Some(selected.id());
        Ok(report)
    }

    /// Deselects everything, then selects `tab`, shows its panel and focuses it.
    ///
    /// Fails with [`TabsError::PanelNotFound`] when `tab` has no linked panel.
    /// The reset has already happened at that point, so nothing stays selected.
    pub fn select_tab(&self, tab: &D::Node) -> Result<(), TabsError> {
        if self.selecting.replace(true) {
            return Err(TabsError::Reentrant);
        }
        let _guard = SelectionGuard(&self.selecting);

        let panels = self.panels();
        self.reset(&panels);

        let tab_id = tab.id();
        let panel = self
            .panel_for_tab(tab, &panels)
            .ok_or_else(|| TabsError::PanelNotFound {
                tab_id: tab_id.clone(),
            })?;

        tab.set_selected(true);
        panel.set_hidden(false);
        tab.focus();

        log::debug!("select_tab: #{} -> panel #{}", tab_id, panel.id());
        Ok(())
    }

    /// Arrow keys, Home and End on a tab move the selection.
    pub fn handle_key(&self, input: KeyInput<'_, D::Node>) -> Result<KeyOutcome, TabsError> {
        // A keypress inside a panel or on empty space is none of our business.
        if input.target.role() != Some(Role::Tab) {
            return Ok(KeyOutcome::Ignored);
        }
        // Modifier shortcuts belong to assistive technology.
        if input.alt_key {
            return Ok(KeyOutcome::Ignored);
        }

        let Some(key) = NavKey::resolve(input.key, input.key_code) else {
            log::trace!("handle_key: '{}' ignored", input.key);
            return Ok(KeyOutcome::Ignored);
        };

        let new_tab = match key {
            NavKey::Left | NavKey::Up => self.prev_tab(),
            NavKey::Right | NavKey::Down => self.next_tab(),
            NavKey::Home => self.first_tab(),
            NavKey::End => self.last_tab(),
        };

        let Some(new_tab) = new_tab else {
            return Ok(KeyOutcome::Ignored);
        };

        self.select_tab(&new_tab)?;
        Ok(KeyOutcome::Handled)
    }

    /// Returns `true` when the click landed on a tab and selected it.
    pub fn handle_click(&self, target: &D::Node) -> Result<bool, TabsError> {
        if target.role() != Some(Role::Tab) {
            log::trace!("handle_click: target is not a tab");
            return Ok(false);
        }
        self.select_tab(target)?;
        Ok(true)
    }

    fn panel_for_tab(&self, tab: &D::Node, panels: &[D::Node]) -> Option<D::Node> {
        let panel_id = tab.attribute(attr::ARIA_CONTROLS)?;
        panels.iter().find(|panel| panel.id() == panel_id).cloned()
    }

    fn reset(&self, panels: &[D::Node]) {
        for tab in self.tabs() {
            tab.set_selected(false);
        }
        for panel in panels {
            panel.set_hidden(true);
        }
    }

    /// Position of the selected tab, `-1` when none is selected.
    fn selected_index(tabs: &[D::Node]) -> isize {
        tabs.iter()
            .position(|tab| tab.is_selected())
            .map_or(-1, |i| i as isize)
    }

    /// Tab before the selected one, wrapping to the last.
    fn prev_tab(&self) -> Option<D::Node> {
        let tabs = self.tabs();
        if tabs.is_empty() {
            return None;
        }
        let idx = (Self::selected_index(&tabs) - 1).rem_euclid(tabs.len() as isize);
        tabs.into_iter().nth(idx as usize)
    }

    /// Tab after the selected one, wrapping to the first.
    fn next_tab(&self) -> Option<D::Node> {
        let tabs = self.tabs();
        if tabs.is_empty() {
            return None;
        }
        let idx = (Self::selected_index(&tabs) + 1).rem_euclid(tabs.len() as isize);
        tabs.into_iter().nth(idx as usize)
    }

    fn first_tab(&self) -> Option<D::Node> {
        self.tabs().into_iter().next()
    }

    fn last_tab(&self) -> Option<D::Node> {
        self.tabs().into_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::tabs::memory::{MemoryHost, MemoryNode};

    /// `n` tab/panel pairs with ids `t0`/`p0`, `t1`/`p1`, ...
    fn fixture(n: usize) -> (TabListController<MemoryHost>, Vec<MemoryNode>, Vec<MemoryNode>) {
        let host = MemoryHost::new();
        let mut tabs = Vec::new();
        let mut panels = Vec::new();
        for i in 0..n {
            let tab = MemoryNode::tab(Some(&format!("t{i}")));
            let panel = MemoryNode::panel(Some(&format!("p{i}")));
            host.append(&tab);
            host.append(&panel);
            tabs.push(tab);
            panels.push(panel);
        }
        (TabListController::new(host), tabs, panels)
    }

    fn key<'a>(target: &'a MemoryNode, key: &'a str) -> KeyInput<'a, MemoryNode> {
        KeyInput {
            target,
            key,
            key_code: 0,
            alt_key: false,
        }
    }

    fn selected_ids(controller: &TabListController<MemoryHost>) -> Vec<String> {
        controller
            .tabs()
            .iter()
            .filter(|t| t.is_selected())
            .map(|t| t.id())
            .collect()
    }

    fn visible_ids(controller: &TabListController<MemoryHost>) -> Vec<String> {
        controller
            .panels()
            .iter()
            .filter(|p| p.attribute(attr::HIDDEN).is_none())
            .map(|p| p.id())
            .collect()
    }

    /// Presses `k` on the currently selected tab.
    fn press(controller: &TabListController<MemoryHost>, k: &str) -> KeyOutcome {
        let current = controller.selected_tab().expect("a tab is selected");
        controller.handle_key(key(&current, k)).unwrap()
    }

    #[test]
    fn test_link_panels_selects_exactly_one_linked_pair() {
        for n in 1..=5 {
            let (controller, tabs, panels) = fixture(n);
            let report = controller.link_panels().unwrap();

            assert_eq!(report.linked.len(), n);
            assert!(report.skipped.is_empty());
            assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
            assert_eq!(visible_ids(&controller), vec!["p0".to_string()]);

            for (tab, panel) in tabs.iter().zip(&panels) {
                assert_eq!(tab.attribute(attr::ARIA_CONTROLS), Some(panel.id()));
                assert_eq!(panel.attribute(attr::ARIA_LABELLEDBY), Some(tab.id()));
            }
        }
    }

    #[test]
    fn test_link_panels_keeps_preselected_tab() {
        let (controller, tabs, _) = fixture(3);
        tabs[1].set_selected(true);

        let report = controller.link_panels().unwrap();

        assert_eq!(report.selected.as_deref(), Some("t1"));
        assert_eq!(selected_ids(&controller), vec!["t1".to_string()]);
        assert_eq!(visible_ids(&controller), vec!["p1".to_string()]);
    }

    #[test]
    fn test_link_panels_with_no_tabs_is_noop() {
        let (controller, _, _) = fixture(0);
        let report = controller.link_panels().unwrap();
        assert_eq!(report, LinkReport::default());
    }

    #[test]
    fn test_link_panels_updates_aria_and_focus() {
        let (controller, tabs, _) = fixture(2);
        controller.link_panels().unwrap();

        assert_eq!(tabs[0].attribute(attr::ARIA_SELECTED).as_deref(), Some("true"));
        assert_eq!(tabs[0].attribute(attr::TABINDEX).as_deref(), Some("0"));
        assert_eq!(tabs[1].attribute(attr::ARIA_SELECTED).as_deref(), Some("false"));
        assert_eq!(tabs[1].attribute(attr::TABINDEX).as_deref(), Some("-1"));
        assert_eq!(controller.distribution().focused().as_deref(), Some("t0"));
    }

    #[test]
    fn test_three_tabs_right_arrow_wraps() {
        let (controller, _, _) = fixture(3);
        controller.link_panels().unwrap();
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);

        assert_eq!(press(&controller, "ArrowRight"), KeyOutcome::Handled);
        assert_eq!(press(&controller, "ArrowRight"), KeyOutcome::Handled);
        assert_eq!(selected_ids(&controller), vec!["t2".to_string()]);
        assert_eq!(visible_ids(&controller), vec!["p2".to_string()]);

        press(&controller, "ArrowRight");
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_down_on_last_wraps_to_first() {
        let (controller, tabs, _) = fixture(3);
        tabs[2].set_selected(true);
        controller.link_panels().unwrap();

        press(&controller, "ArrowDown");
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_left_and_up_on_first_wrap_to_last() {
        for k in ["ArrowLeft", "ArrowUp", "Left", "Up"] {
            let (controller, _, _) = fixture(3);
            controller.link_panels().unwrap();

            press(&controller, k);
            assert_eq!(selected_ids(&controller), vec!["t2".to_string()], "key {k}");
        }
    }

    #[test]
    fn test_home_and_end() {
        let (controller, _, _) = fixture(4);
        controller.link_panels().unwrap();

        press(&controller, "End");
        assert_eq!(selected_ids(&controller), vec!["t3".to_string()]);
        press(&controller, "End");
        assert_eq!(selected_ids(&controller), vec!["t3".to_string()]);

        press(&controller, "ArrowLeft");
        press(&controller, "Home");
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
        press(&controller, "Home");
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_legacy_key_codes() {
        let (controller, tabs, _) = fixture(3);
        controller.link_panels().unwrap();

        let input = KeyInput {
            target: &tabs[0],
            key: "Unidentified",
            key_code: 35,
            alt_key: false,
        };
        assert_eq!(controller.handle_key(input).unwrap(), KeyOutcome::Handled);
        assert_eq!(selected_ids(&controller), vec!["t2".to_string()]);
    }

    #[test]
    fn test_unrelated_key_is_ignored() {
        let (controller, tabs, _) = fixture(3);
        controller.link_panels().unwrap();

        for k in ["Enter", " ", "Tab", "a"] {
            assert_eq!(
                controller.handle_key(key(&tabs[0], k)).unwrap(),
                KeyOutcome::Ignored
            );
        }
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_alt_modified_key_is_ignored() {
        let (controller, tabs, _) = fixture(3);
        controller.link_panels().unwrap();

        let input = KeyInput {
            alt_key: true,
            ..key(&tabs[0], "ArrowRight")
        };
        assert_eq!(controller.handle_key(input).unwrap(), KeyOutcome::Ignored);
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_key_from_panel_is_ignored() {
        let (controller, _, panels) = fixture(3);
        controller.link_panels().unwrap();

        assert_eq!(
            controller.handle_key(key(&panels[0], "ArrowRight")).unwrap(),
            KeyOutcome::Ignored
        );
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_click_on_tab_selects_it() {
        let (controller, tabs, _) = fixture(3);
        controller.link_panels().unwrap();

        assert!(controller.handle_click(&tabs[2]).unwrap());
        assert_eq!(selected_ids(&controller), vec!["t2".to_string()]);
        assert_eq!(visible_ids(&controller), vec!["p2".to_string()]);
        assert_eq!(controller.distribution().focused().as_deref(), Some("t2"));
    }

    #[test]
    fn test_click_elsewhere_changes_nothing() {
        let (controller, tabs, panels) = fixture(3);
        controller.link_panels().unwrap();
        controller.select_tab(&tabs[1]).unwrap();

        let before: Vec<_> = tabs.iter().chain(&panels).map(MemoryNode::snapshot).collect();

        assert!(!controller.handle_click(&panels[0]).unwrap());
        assert!(!controller.handle_click(&controller.distribution().host()).unwrap());

        let after: Vec<_> = tabs.iter().chain(&panels).map(MemoryNode::snapshot).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_select_tab_is_idempotent() {
        let (controller, tabs, panels) = fixture(3);
        controller.link_panels().unwrap();

        controller.select_tab(&tabs[1]).unwrap();
        let once: Vec<_> = tabs.iter().chain(&panels).map(MemoryNode::snapshot).collect();
        controller.select_tab(&tabs[1]).unwrap();
        let twice: Vec<_> = tabs.iter().chain(&panels).map(MemoryNode::snapshot).collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_tab_without_panel_sibling_is_skipped() {
        let host = MemoryHost::new();
        let t0 = MemoryNode::tab(Some("t0"));
        let p0 = MemoryNode::panel(Some("p0"));
        let t1 = MemoryNode::tab(Some("t1"));
        let t2 = MemoryNode::tab(Some("t2"));
        let p2 = MemoryNode::panel(Some("p2"));
        for node in [&t0, &p0, &t1, &t2, &p2] {
            host.append(node);
        }
        let controller = TabListController::new(host);

        let report = controller.link_panels().unwrap();

        assert_eq!(report.skipped, vec!["t1".to_string()]);
        assert_eq!(
            report.linked,
            vec![
                ("t0".to_string(), "p0".to_string()),
                ("t2".to_string(), "p2".to_string())
            ]
        );
        assert_eq!(t1.attribute(attr::ARIA_CONTROLS), None);
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_selecting_unlinked_tab_fails_and_leaves_nothing_selected() {
        let host = MemoryHost::new();
        let t0 = MemoryNode::tab(Some("t0"));
        let p0 = MemoryNode::panel(Some("p0"));
        let t1 = MemoryNode::tab(Some("t1"));
        let stray = MemoryNode::element("div");
        for node in [&t0, &p0, &t1, &stray] {
            host.append(node);
        }
        let controller = TabListController::new(host);
        controller.link_panels().unwrap();

        let err = controller.select_tab(&t1).unwrap_err();

        assert_eq!(
            err,
            TabsError::PanelNotFound {
                tab_id: "t1".to_string()
            }
        );
        assert!(selected_ids(&controller).is_empty());
        assert!(visible_ids(&controller).is_empty());
    }

    #[test]
    fn test_link_panels_reports_unlinked_preselected_tab() {
        let host = MemoryHost::new();
        let t0 = MemoryNode::tab(Some("t0"));
        t0.set_selected(true);
        host.append(&t0);
        let controller = TabListController::new(host);

        assert_eq!(
            controller.link_panels(),
            Err(TabsError::PanelNotFound {
                tab_id: "t0".to_string()
            })
        );
    }

    #[test]
    fn test_relink_after_distribution_change() {
        let (controller, _, _) = fixture(2);
        controller.link_panels().unwrap();
        press(&controller, "ArrowRight");

        let t2 = MemoryNode::tab(Some("t2"));
        let p2 = MemoryNode::panel(Some("p2"));
        controller.distribution().append(&t2);
        controller.distribution().append(&p2);
        let report = controller.link_panels().unwrap();

        assert_eq!(report.linked.len(), 3);
        assert_eq!(report.selected.as_deref(), Some("t1"));
        press(&controller, "End");
        assert_eq!(selected_ids(&controller), vec!["t2".to_string()]);
    }

    #[test]
    fn test_nav_with_nothing_selected() {
        let (controller, tabs, _) = fixture(3);
        controller.link_panels().unwrap();
        tabs[0].set_selected(false);

        controller.handle_key(key(&tabs[0], "ArrowRight")).unwrap();
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);

        // Nothing selected counts as position -1, so previous lands on N-2.
        tabs[0].set_selected(false);
        controller.handle_key(key(&tabs[0], "ArrowLeft")).unwrap();
        assert_eq!(selected_ids(&controller), vec!["t1".to_string()]);
    }

    #[test]
    fn test_prev_after_failed_selection() {
        let (controller, tabs, _) = fixture(4);
        controller.link_panels().unwrap();
        tabs[0].set_selected(false);

        controller.handle_key(key(&tabs[0], "ArrowLeft")).unwrap();
        assert_eq!(selected_ids(&controller), vec!["t2".to_string()]);
        assert_eq!(visible_ids(&controller), vec!["p2".to_string()]);
    }

    #[test]
    fn test_prev_with_single_unselected_tab() {
        let (controller, tabs, _) = fixture(1);
        controller.link_panels().unwrap();
        tabs[0].set_selected(false);

        controller.handle_key(key(&tabs[0], "ArrowUp")).unwrap();
        assert_eq!(selected_ids(&controller), vec!["t0".to_string()]);
    }

    #[test]
    fn test_connect_sets_default_role() {
        let (controller, _, _) = fixture(1);
        controller.connect();
        assert_eq!(controller.distribution().host().role(), Some(Role::TabList));

        let host = MemoryHost::new();
        host.host().set_attribute(attr::ROLE, "toolbar");
        let controller = TabListController::new(host);
        controller.connect();
        assert_eq!(
            controller.distribution().host().attribute(attr::ROLE).as_deref(),
            Some("toolbar")
        );
    }

    #[test]
    fn test_generated_ids_unique_across_lists() {
        let first = MemoryHost::new();
        let second = MemoryHost::new();
        let mut ids = std::collections::HashSet::new();
        for host in [&first, &second] {
            for _ in 0..3 {
                let tab = MemoryNode::tab(None);
                host.append(&tab);
                host.append(&MemoryNode::panel(None));
                assert!(ids.insert(tab.id()));
            }
        }
        for host in [first, second] {
            let controller = TabListController::new(host);
            let report = controller.link_panels().unwrap();
            assert_eq!(report.linked.len(), 3);
        }
    }
}
