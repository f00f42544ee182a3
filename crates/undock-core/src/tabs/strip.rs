//! Ordered tab strip with selection, freezing and order restoration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for the content pane a tab presents.
pub type PaneId = Uuid;

/// A single tab entry in the strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tab {
    /// Content pane this tab presents.
    pub content: PaneId,
    /// Text shown on the tab.
    pub label: String,
    /// Optional icon name shown before the label.
    pub icon: Option<String>,
    /// Slot recorded by the last freeze, used to restore order.
    pub original_index: Option<usize>,
}

impl Tab {
    /// Create a tab for a content pane.
    pub fn new(content: PaneId, label: impl Into<String>) -> Self {
        Self {
            content,
            label: label.into(),
            icon: None,
            original_index: None,
        }
    }

    /// Set the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// State change emitted by the strip, drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabEvent {
    /// Selection moved between slots.
    ActiveChanged {
        old: Option<usize>,
        new: Option<usize>,
    },
    /// A tab moved from one slot to another.
    Reordered { from: usize, to: usize },
}

/// Ordered collection of tabs with a single active selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: Option<usize>,
    #[serde(skip)]
    events: Vec<TabEvent>,
}

impl TabStrip {
    /// Create an empty strip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab for `content` at `insert_at` (default: append) and return
    /// its slot. The first tab becomes active.
    ///
    /// A missing content pane is ignored and nothing is added.
    pub fn add_tab(
        &mut self,
        content: Option<PaneId>,
        label: impl Into<String>,
        icon: Option<String>,
        insert_at: Option<usize>,
    ) -> Option<usize> {
        let Some(content) = content else {
            log::debug!("ignoring tab with no content pane");
            return None;
        };
        let tab = Tab {
            content,
            label: label.into(),
            icon,
            original_index: None,
        };
        Some(self.insert_tab(insert_at.unwrap_or(self.tabs.len()), tab))
    }

    /// Insert a tab at `index` (clamped to the end), returning the slot used.
    ///
    /// The selection keeps following the tab it pointed at.
    pub fn insert_tab(&mut self, index: usize, tab: Tab) -> usize {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, tab);
        if let Some(active) = self.active.as_mut() {
            if *active >= index {
                *active += 1;
            }
        }
        if self.active.is_none() {
            self.set_active(Some(index));
        }
        index
    }

    /// Move the tab at `from` to `to` and select it.
    ///
    /// Moving a tab onto its own slot changes nothing and emits no events.
    pub fn move_tab(&mut self, from: usize, to: usize) {
        let len = self.tabs.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let tab = self.tabs.remove(from);
        self.tabs.insert(to, tab);
        self.events.push(TabEvent::Reordered { from, to });
        self.set_active(Some(to));
    }

    /// Remove and return the tab at `index`, adjusting the selection.
    pub fn remove_tab(&mut self, index: usize) -> Option<Tab> {
        if index >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(index);
        match self.active {
            Some(active) if active == index => {
                let new = if self.tabs.is_empty() {
                    None
                } else {
                    Some(active.min(self.tabs.len() - 1))
                };
                self.active = new;
                self.events.push(TabEvent::ActiveChanged {
                    old: Some(active),
                    new,
                });
            }
            Some(active) if active > index => {
                // Same tab, one slot to the left.
                self.active = Some(active - 1);
            }
            _ => {}
        }
        Some(tab)
    }

    /// Change the selection. Out-of-range slots are ignored.
    pub fn set_active(&mut self, index: Option<usize>) {
        if let Some(i) = index {
            if i >= self.tabs.len() {
                return;
            }
        }
        if index == self.active {
            return;
        }
        let old = self.active;
        self.active = index;
        self.events.push(TabEvent::ActiveChanged { old, new: index });
    }

    /// Record the current slot of every tab as its home slot.
    pub fn freeze(&mut self) {
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.original_index = Some(index);
        }
        log::debug!("froze order of {} tabs", self.tabs.len());
    }

    /// Swap tabs back toward their frozen home slots.
    ///
    /// Home slots beyond the strip are clamped to the last slot. The pass is
    /// bounded by the tab count, so conflicting home slots cannot loop forever.
    pub fn sort_tabs(&mut self) {
        let len = self.tabs.len();
        if len < 2 {
            return;
        }

        for tab in &self.tabs {
            if let Some(origin) = tab.original_index {
                if origin >= len {
                    log::warn!(
                        "tab '{}' remembers slot {} in a strip of {}, clamping",
                        tab.label,
                        origin,
                        len
                    );
                }
            }
        }

        let mut budget = len;
        loop {
            let misplaced = self.tabs.iter().enumerate().find_map(|(index, tab)| {
                tab.original_index
                    .map(|origin| (index, origin.min(len - 1)))
                    .filter(|&(index, target)| target != index)
            });
            let Some((index, target)) = misplaced else {
                break;
            };
            if budget == 0 {
                log::warn!("tab order still unsettled after {len} swaps, giving up");
                break;
            }
            budget -= 1;
            self.tabs.swap(index, target);
            self.events.push(TabEvent::Reordered {
                from: index,
                to: target,
            });
            // The selection follows tab identity through the swap.
            if let Some(active) = self.active.as_mut() {
                if *active == index {
                    *active = target;
                } else if *active == target {
                    *active = index;
                }
            }
        }
    }

    /// All tabs in strip order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Slot of the active tab, if any.
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// The active tab, if any.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    /// Tab at `index`.
    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    /// Mutable tab at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    /// Slot of the first tab with the given label.
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.label == label)
    }

    /// Number of tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Whether the strip has no tabs.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_with(labels: &[&str]) -> TabStrip {
        let mut strip = TabStrip::new();
        for label in labels {
            strip.add_tab(Some(Uuid::new_v4()), *label, None, None);
        }
        strip
    }

    fn labels(strip: &TabStrip) -> Vec<&str> {
        strip.tabs().iter().map(|tab| tab.label.as_str()).collect()
    }

    #[test]
    fn test_first_tab_becomes_active() {
        let mut strip = TabStrip::new();
        assert_eq!(strip.active(), None);

        strip.add_tab(Some(Uuid::new_v4()), "home", None, None);
        strip.add_tab(Some(Uuid::new_v4()), "settings", None, None);

        assert_eq!(strip.active(), Some(0));
        assert_eq!(
            strip.take_events(),
            vec![TabEvent::ActiveChanged {
                old: None,
                new: Some(0)
            }]
        );
    }

    #[test]
    fn test_add_tab_without_content_is_ignored() {
        let mut strip = TabStrip::new();

        assert_eq!(strip.add_tab(None, "ghost", None, None), None);

        assert!(strip.is_empty());
        assert_eq!(strip.active(), None);
        assert!(strip.take_events().is_empty());
    }

    #[test]
    fn test_move_tab_to_same_slot_is_a_no_op() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.take_events();

        strip.move_tab(1, 1);

        assert_eq!(labels(&strip), vec!["a", "b", "c"]);
        assert_eq!(strip.active(), Some(0));
        assert!(strip.take_events().is_empty());
    }

    #[test]
    fn test_move_tab_reorders_and_selects() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.take_events();

        strip.move_tab(0, 2);

        assert_eq!(labels(&strip), vec!["b", "c", "a"]);
        assert_eq!(strip.active(), Some(2));
        assert_eq!(
            strip.take_events(),
            vec![
                TabEvent::Reordered { from: 0, to: 2 },
                TabEvent::ActiveChanged {
                    old: Some(0),
                    new: Some(2)
                },
            ]
        );
    }

    #[test]
    fn test_move_tab_out_of_range_is_a_no_op() {
        let mut strip = strip_with(&["a", "b"]);
        strip.take_events();

        strip.move_tab(0, 5);
        strip.move_tab(5, 0);

        assert_eq!(labels(&strip), vec!["a", "b"]);
        assert!(strip.take_events().is_empty());
    }

    #[test]
    fn test_freeze_records_current_order() {
        let mut strip = strip_with(&["a", "b", "c"]);

        strip.freeze();

        let recorded: Vec<_> = strip.tabs().iter().map(|t| t.original_index).collect();
        assert_eq!(recorded, vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_sort_tabs_restores_frozen_order() {
        let mut strip = strip_with(&["a", "b", "c", "d"]);
        strip.freeze();

        strip.move_tab(0, 3);
        strip.move_tab(1, 2);
        assert_ne!(labels(&strip), vec!["a", "b", "c", "d"]);

        strip.sort_tabs();

        assert_eq!(labels(&strip), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_sort_tabs_keeps_selection_on_same_tab() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.freeze();
        strip.move_tab(0, 2); // selects "a", now at slot 2

        strip.sort_tabs();

        assert_eq!(labels(&strip), vec!["a", "b", "c"]);
        assert_eq!(strip.active_tab().map(|t| t.label.as_str()), Some("a"));
    }

    #[test]
    fn test_sort_tabs_clamps_out_of_range_slots() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.freeze();
        strip.get_mut(0).unwrap().original_index = Some(9);

        strip.sort_tabs();

        // Slot 9 clamps to the last slot.
        assert_eq!(labels(&strip), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_sort_tabs_terminates_with_conflicting_slots() {
        let mut strip = strip_with(&["a", "b", "c"]);
        for i in 0..3 {
            strip.get_mut(i).unwrap().original_index = Some(0);
        }

        // Three tabs all claiming slot 0 can never settle.
        strip.sort_tabs();

        assert_eq!(strip.len(), 3);
    }

    #[test]
    fn test_remove_active_tab_selects_neighbour() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.set_active(Some(2));
        strip.take_events();

        strip.remove_tab(2);

        assert_eq!(strip.active(), Some(1));
        assert_eq!(
            strip.take_events(),
            vec![TabEvent::ActiveChanged {
                old: Some(2),
                new: Some(1)
            }]
        );
    }

    #[test]
    fn test_remove_before_active_keeps_same_tab() {
        let mut strip = strip_with(&["a", "b", "c"]);
        strip.set_active(Some(2));
        strip.take_events();

        strip.remove_tab(0);

        assert_eq!(strip.active_tab().map(|t| t.label.as_str()), Some("c"));
        assert!(strip.take_events().is_empty());
    }

    #[test]
    fn test_remove_last_tab_clears_selection() {
        let mut strip = strip_with(&["a"]);
        strip.take_events();

        strip.remove_tab(0);

        assert!(strip.is_empty());
        assert_eq!(strip.active(), None);
    }

    #[test]
    fn test_remove_missing_tab_is_a_no_op() {
        let mut strip = strip_with(&["a"]);

        assert!(strip.remove_tab(7).is_none());
        assert_eq!(strip.len(), 1);
    }

    #[test]
    fn test_add_tab_at_index() {
        let mut strip = strip_with(&["a", "c"]);

        let index = strip.add_tab(Some(Uuid::new_v4()), "b", None, Some(1));

        assert_eq!(index, Some(1));
        assert_eq!(labels(&strip), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_tab_shifts_selection() {
        let mut strip = strip_with(&["a", "b"]);
        strip.set_active(Some(1));

        strip.insert_tab(0, Tab::new(Uuid::new_v4(), "z"));

        assert_eq!(labels(&strip), vec!["z", "a", "b"]);
        assert_eq!(strip.active_tab().map(|t| t.label.as_str()), Some("b"));
    }
}
