//! Multi-select cuisine filtering.
//!
//! Several panel surfaces (desktop and compact in the original UI) render
//! the same logical selection. The selection is a single set of tags; the
//! panels are render targets and input adapters for it, never independently
//! authoritative. Reading the selection unions the checked state across
//! panels and mirrors the result back, so reopening any panel shows the
//! true current selection.

use crate::domain::CuisineTag;
use crate::models::EnrichedRestaurant;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// One render target for the selection.
pub trait FilterPanel: Send + Sync {
    /// Tags currently checked on this panel.
    fn checked(&self) -> BTreeSet<CuisineTag>;

    /// Overwrites this panel's checked state.
    fn set_checked(&self, tags: &BTreeSet<CuisineTag>);

    /// Closes the panel if it is open. Called on apply.
    fn close(&self);
}

pub struct CuisineFilter {
    panels: Vec<Arc<dyn FilterPanel>>,
}

impl CuisineFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { panels: Vec::new() }
    }

    pub fn register_panel(&mut self, panel: Arc<dyn FilterPanel>) {
        self.panels.push(panel);
    }

    /// Current selection: the union of checked state across panels.
    ///
    /// Mirrors the union back onto every panel, restoring the invariant
    /// that all panels show the same checked set.
    #[must_use]
    pub fn selected(&self) -> BTreeSet<CuisineTag> {
        let mut union = BTreeSet::new();
        for panel in &self.panels {
            union.extend(panel.checked());
        }
        for panel in &self.panels {
            panel.set_checked(&union);
        }
        union
    }

    /// Applies the selection: syncs panels, closes them, returns the set to
    /// filter with.
    #[must_use]
    pub fn apply(&self) -> BTreeSet<CuisineTag> {
        let selection = self.selected();
        for panel in &self.panels {
            panel.close();
        }
        selection
    }

    /// Empties the selection on every panel.
    pub fn clear(&self) {
        let empty = BTreeSet::new();
        for panel in &self.panels {
            panel.set_checked(&empty);
        }
    }
}

impl Default for CuisineFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a restaurant passes the selection.
///
/// An empty selection filters nothing; otherwise the restaurant's tag set
/// must intersect the selection (OR across selected tags).
#[must_use]
pub fn matches(restaurant: &EnrichedRestaurant, selection: &BTreeSet<CuisineTag>) -> bool {
    selection.is_empty() || restaurant.has_any_cuisine(selection)
}

/// The visible subset for a selection, in input order.
#[must_use]
pub fn filter_visible(
    restaurants: &[EnrichedRestaurant],
    selection: &BTreeSet<CuisineTag>,
) -> Vec<EnrichedRestaurant> {
    restaurants
        .iter()
        .filter(|r| matches(r, selection))
        .cloned()
        .collect()
}

/// A plain panel holding its checked state in memory.
///
/// Serves the CLI and tests; a real UI panel would adapt checkbox state
/// behind the same trait.
#[derive(Default)]
pub struct InMemoryPanel {
    state: Mutex<PanelState>,
}

#[derive(Default)]
struct PanelState {
    checked: BTreeSet<CuisineTag>,
    open: bool,
}

impl InMemoryPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn open(&self) {
        self.state().open = true;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state().open
    }

    /// Toggles one checkbox, as a user click would.
    pub fn toggle(&self, tag: &CuisineTag) {
        let mut state = self.state();
        if !state.checked.remove(tag) {
            state.checked.insert(tag.clone());
        }
    }
}

impl FilterPanel for InMemoryPanel {
    fn checked(&self) -> BTreeSet<CuisineTag> {
        self.state().checked.clone()
    }

    fn set_checked(&self, tags: &BTreeSet<CuisineTag>) {
        self.state().checked = tags.clone();
    }

    fn close(&self) {
        self.state().open = false;
    }
}
