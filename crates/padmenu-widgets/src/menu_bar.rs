#![forbid(unsafe_code)]

//! The horizontal menu bar.
//!
//! One entry per configured button: a fixed-size layout slot in a
//! [`FlowRow`], a text label, and an interactive button visual. Selection
//! is cyclic in both directions. Visuals are adopted at construction and
//! released at teardown in reverse registration order; release runs at
//! most once, and dropping an unreleased bar releases it.

use padmenu_core::config::MenuConfig;
use padmenu_layout::{FixedNode, FlowRow, LayoutEnv, LayoutNode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::visual::{ButtonVisual, ReleaseError, TextVisual, VisualFactory};

/// Persisted shape of the bar: which entry is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMenuBar {
    /// Index of the selected entry at save time.
    pub selected_button: usize,
}

struct MenuEntry {
    slot: usize,
    label: String,
    text: Box<dyn TextVisual>,
    button: Box<dyn ButtonVisual>,
}

/// Gamepad-navigable button bar.
pub struct MenuBar {
    row: FlowRow,
    entries: Vec<MenuEntry>,
    selected: usize,
    active: bool,
    released: bool,
}

impl MenuBar {
    /// Build the bar from configuration, creating one layout slot and one
    /// pair of visuals per button spec. The first entry starts selected.
    #[must_use]
    pub fn new(config: &MenuConfig, factory: &mut dyn VisualFactory) -> Self {
        let mut row = FlowRow::new(config.metrics);
        let mut entries = Vec::with_capacity(config.buttons.len());
        for spec in &config.buttons {
            let slot = row.add_child(Box::new(FixedNode::new(spec.width, spec.height)));
            let text = factory.create_text(&spec.label, &config.font);
            let mut button = factory.create_button();
            button.set_state_unselected();
            entries.push(MenuEntry {
                slot,
                label: spec.label.clone(),
                text,
                button,
            });
        }
        if let Some(first) = entries.first_mut() {
            first.button.set_state_selected();
        }
        Self {
            row,
            entries,
            selected: 0,
            active: false,
            released: false,
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the bar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the selected entry.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Label of the selected entry, if any.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.entries.get(self.selected).map(|e| e.label.as_str())
    }

    /// Whether the pane is visible and interactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the selection by `dir` entries, wrapping in both
    /// directions; the outgoing entry is unselected, the incoming one
    /// selected. No-op on an empty bar.
    pub fn select_next(&mut self, dir: i32) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        let current = self.selected;
        let next = (current as i64 + i64::from(dir)).rem_euclid(count as i64) as usize;
        self.entries[current].button.set_state_unselected();
        self.entries[next].button.set_state_selected();
        self.selected = next;
    }

    /// Force the selection to `index` (taken modulo the entry count),
    /// updating visuals. Used when restoring persisted state.
    pub fn set_selected(&mut self, index: usize) {
        let count = self.entries.len();
        if count == 0 {
            return;
        }
        let next = index % count;
        self.entries[self.selected].button.set_state_unselected();
        self.entries[next].button.set_state_selected();
        self.selected = next;
    }

    /// Show or hide the pane. Activation focuses the selected entry.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if active
            && let Some(entry) = self.entries.get_mut(self.selected)
        {
            entry.button.set_state_focused();
        }
    }

    /// Measure and position the bar within the reference window.
    pub fn layout(&mut self, env: &LayoutEnv) {
        self.row.do_layout(env);
    }

    /// The underlying layout container.
    #[must_use]
    pub fn row(&self) -> &FlowRow {
        &self.row
    }

    /// The underlying layout container, mutable. Child mutations go
    /// through [`FlowRow::update_child`] so dirty marks propagate.
    pub fn row_mut(&mut self) -> &mut FlowRow {
        &mut self.row
    }

    /// Absolute position of an entry's layout slot, from the last layout
    /// pass.
    #[must_use]
    pub fn entry_position(&self, index: usize) -> Option<(f32, f32)> {
        let entry = self.entries.get(index)?;
        self.row.child(entry.slot).map(|node| node.position())
    }

    /// Submit draw calls for every entry. Inactive bars draw nothing.
    pub fn render(&mut self) {
        if !self.active {
            return;
        }
        for entry in &mut self.entries {
            entry.button.render();
            entry.text.render();
        }
    }

    /// Release every entry's visuals in reverse registration order.
    ///
    /// Failures are collected, never short-circuited: one stuck visual
    /// must not leak the rest. Subsequent calls are no-ops.
    pub fn release(&mut self) -> Vec<ReleaseError> {
        if self.released {
            return Vec::new();
        }
        self.released = true;
        let mut failures = Vec::new();
        for entry in self.entries.iter_mut().rev() {
            if let Err(err) = entry.button.release() {
                failures.push(err);
            }
            if let Err(err) = entry.text.release() {
                failures.push(err);
            }
        }
        failures
    }
}

impl Drop for MenuBar {
    fn drop(&mut self) {
        for err in self.release() {
            warn!(%err, "visual release failed during drop");
        }
    }
}
