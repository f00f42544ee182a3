//! Tab container with drag-to-detach floating windows.
//!
//! While a tab is attached its slot in the strip is its identity; once
//! detached it lives in the floating-window table under a generated id
//! until the window closes and the tab re-attaches.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::drag::TabDragController;
use super::strip::{PaneId, Tab, TabEvent, TabStrip};

/// Identifier for a floating window holding a detached tab.
pub type DetachedId = Uuid;

/// A tab torn out of the strip, presented in its own floating window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachedTab {
    /// Window identifier, reclaimed when the window closes.
    pub id: DetachedId,
    /// The tab as it left the strip, frozen slot included.
    pub tab: Tab,
    /// Window position in screen coordinates.
    pub position: Point,
    /// Content size the window opens with.
    pub size: Size,
}

/// Owns the tab strip, the drag recogniser and the floating-window table.
#[derive(Debug, Clone, Default)]
pub struct TabContainer {
    /// Attached tabs in strip order.
    pub strip: TabStrip,
    /// Gesture recogniser the tab-strip widget drives.
    pub drag: TabDragController,
    detached: BTreeMap<DetachedId, DetachedTab>,
    host_icon: Option<String>,
}

impl TabContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Icon used for floating windows whose tab carries none.
    pub fn set_host_icon(&mut self, icon: impl Into<String>) {
        self.host_icon = Some(icon.into());
    }

    /// Add a tab for `content` at `insert_at` (default: append).
    ///
    /// A missing content pane is ignored and nothing is added.
    pub fn add_tab(
        &mut self,
        content: Option<PaneId>,
        label: impl Into<String>,
        icon: Option<String>,
        insert_at: Option<usize>,
    ) -> Option<usize> {
        self.strip.add_tab(content, label, icon, insert_at)
    }

    /// Move the tab at `from` to `to` and select it.
    pub fn move_tab(&mut self, from: usize, to: usize) {
        self.strip.move_tab(from, to);
    }

    /// Change the selected tab.
    pub fn set_active(&mut self, index: Option<usize>) {
        self.strip.set_active(index);
    }

    /// Record the current order as the canonical one.
    pub fn freeze(&mut self) {
        self.strip.freeze();
    }

    /// Restore the canonical order recorded by [`freeze`](Self::freeze).
    pub fn sort_tabs(&mut self) {
        self.strip.sort_tabs();
    }

    /// Tear the tab at `index` out of the strip into a floating window at
    /// `at`, sized to the content's prior geometry.
    ///
    /// Detaching the sole remaining tab is permitted and leaves the strip
    /// empty. A slot with no tab is a no-op and registers nothing.
    pub fn detach_tab(&mut self, index: usize, at: Point, size: Size) -> Option<DetachedId> {
        let mut tab = self.strip.remove_tab(index)?;
        if tab.icon.is_none() {
            tab.icon = self.host_icon.clone();
        }
        let id = Uuid::new_v4();
        log::info!("detaching tab '{}' into floating window {id}", tab.label);
        self.detached.insert(
            id,
            DetachedTab {
                id,
                tab,
                position: at,
                size,
            },
        );
        Some(id)
    }

    /// Close the floating window `id` and put its tab back into the strip.
    ///
    /// The tab lands at `insert_at` if given, else at its frozen slot, else
    /// at the end; it becomes active and the strip re-sorts to canonical
    /// order. Returns the tab's final slot, or `None` for an unknown window.
    pub fn attach_tab(&mut self, id: DetachedId, insert_at: Option<usize>) -> Option<usize> {
        let window = self.detached.remove(&id)?;
        log::info!("re-attaching tab '{}' from window {id}", window.tab.label);
        let slot = insert_at
            .or(window.tab.original_index)
            .unwrap_or(self.strip.len());
        let index = self.strip.insert_tab(slot, window.tab);
        self.strip.set_active(Some(index));
        self.strip.sort_tabs();
        self.strip.active()
    }

    /// Remove the first attached tab with the given label; failing that,
    /// close and discard the floating window whose label or id matches.
    ///
    /// Returns whether anything was removed.
    pub fn remove_tab_by_name(&mut self, name: &str) -> bool {
        if let Some(index) = self.strip.index_of_label(name) {
            self.strip.remove_tab(index);
            return true;
        }
        let found = self
            .detached
            .values()
            .find(|window| window.tab.label == name || window.id.to_string() == name)
            .map(|window| window.id);
        if let Some(id) = found {
            self.detached.remove(&id);
            log::info!("discarded floating window {id} for '{name}'");
            return true;
        }
        false
    }

    /// Close every floating window, re-attaching each tab.
    ///
    /// Windows close in descending frozen-slot order so teardown is
    /// deterministic; windows with no frozen slot close last.
    pub fn close_detached_tabs(&mut self) {
        let mut windows: Vec<(Option<usize>, DetachedId)> = self
            .detached
            .values()
            .map(|window| (window.tab.original_index, window.id))
            .collect();
        windows.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, id) in windows {
            self.attach_tab(id, None);
        }
    }

    /// Floating windows in id order.
    pub fn detached(&self) -> impl Iterator<Item = &DetachedTab> {
        self.detached.values()
    }

    /// The floating window `id`, if it is still open.
    pub fn detached_window(&self, id: DetachedId) -> Option<&DetachedTab> {
        self.detached.get(&id)
    }

    /// Mutable access to the floating window `id`, for geometry updates.
    pub fn detached_window_mut(&mut self, id: DetachedId) -> Option<&mut DetachedTab> {
        self.detached.get_mut(&id)
    }

    /// Number of open floating windows.
    pub fn detached_count(&self) -> usize {
        self.detached.len()
    }

    /// Drain strip events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<TabEvent> {
        self.strip.take_events()
    }
}
