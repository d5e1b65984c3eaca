//! Render targets driven by the view controller.
//!
//! The controller owns what is shown; surfaces own how. A browser build
//! would adapt DOM nodes and a tile-map widget behind these traits, the CLI
//! prints, tests record.

use crate::domain::RestaurantId;
use crate::geo::Coordinates;

/// One numbered row of the restaurant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub number: usize,
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub cuisines: Vec<String>,
    /// Formatted distance from the user position, when one is known.
    pub distance: Option<String>,
}

pub trait ListSurface: Send + Sync {
    /// Replaces the whole list with the given entries.
    fn render_entries(&self, entries: &[ListEntry]);

    /// Replaces the list with an empty-state message.
    fn show_empty_state(&self, message: &str);

    /// Highlights one entry by number, clearing any previous highlight.
    /// `None` clears the highlight entirely.
    fn set_active(&self, number: Option<usize>);
}

/// One numbered marker on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub number: usize,
    pub restaurant_id: RestaurantId,
    pub position: Coordinates,
    pub title: String,
}

pub trait MapSurface: Send + Sync {
    /// Removes every marker placed by a previous render.
    fn clear_markers(&self);

    fn add_marker(&self, marker: &MapMarker);

    /// Centers the viewport on a coordinate at the given zoom.
    fn fly_to(&self, position: Coordinates, zoom: f64);

    /// Adjusts the viewport to contain all given coordinates.
    fn fit_bounds(&self, positions: &[Coordinates]);
}
