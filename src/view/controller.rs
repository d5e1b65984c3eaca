//! The map/list view controller.
//!
//! Holds what used to be ambient page state (the loaded restaurants, the
//! filter selection, the active item, the user position) in one owned
//! object, with its collaborators injected at construction. Rendering is a
//! full refresh: both surfaces are cleared and redrawn on every change,
//! which is fine at the tens-of-restaurants scale this view works at.

use crate::geo::{Coordinates, format_distance, haversine_km};
use crate::models::{City, EnrichedRestaurant};
use crate::services::filter::{CuisineFilter, filter_visible};
use crate::services::presenter::{PresentOutcome, VideoPresenter};
use crate::services::restaurants::{LoadError, RestaurantService};
use crate::view::surfaces::{ListEntry, ListSurface, MapMarker, MapSurface};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Message shown when the visible subset is empty.
pub const EMPTY_STATE_MESSAGE: &str = "No restaurants found for this city.";

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no list entry numbered {0}")]
    NoSuchEntry(usize),
}

/// Map behaviour knobs, from the `[map]` config section.
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    /// Zoom used when centering on a city with nothing to show.
    pub city_zoom: f64,
    /// Zoom used when flying to a selected restaurant.
    pub detail_zoom: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            city_zoom: 12.0,
            detail_zoom: 16.0,
        }
    }
}

enum SelectionOrigin {
    List,
    Marker,
}

pub struct MapView {
    loader: Arc<RestaurantService>,
    filter: CuisineFilter,
    presenter: VideoPresenter,
    list: Arc<dyn ListSurface>,
    map: Arc<dyn MapSurface>,
    settings: ViewSettings,

    restaurants: Vec<EnrichedRestaurant>,
    visible: Vec<EnrichedRestaurant>,
    active: Option<usize>,
    user_position: Option<Coordinates>,
    current_city: Option<City>,
}

impl MapView {
    #[must_use]
    pub fn new(
        loader: Arc<RestaurantService>,
        filter: CuisineFilter,
        presenter: VideoPresenter,
        list: Arc<dyn ListSurface>,
        map: Arc<dyn MapSurface>,
        settings: ViewSettings,
    ) -> Self {
        Self {
            loader,
            filter,
            presenter,
            list,
            map,
            settings,
            restaurants: Vec::new(),
            visible: Vec::new(),
            active: None,
            user_position: None,
            current_city: None,
        }
    }

    /// Sets (or clears) the user position used for distance annotations.
    pub fn set_user_position(&mut self, position: Option<Coordinates>) {
        self.user_position = position;
    }

    /// The currently visible subset, in render order.
    #[must_use]
    pub fn visible(&self) -> &[EnrichedRestaurant] {
        &self.visible
    }

    /// The number of the active entry, if any.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Switches to a city: loads its restaurants, replaces the previous set
    /// wholesale and re-renders.
    ///
    /// An earlier in-flight load is not cancelled; if its response resolves
    /// after this one it will overwrite this city's state. The original
    /// design carries the same race.
    pub async fn select_city(&mut self, city: &City) -> Result<(), ViewError> {
        let restaurants = self.loader.load_for_city(city.id).await?;
        info!(city = %city.name, count = restaurants.len(), "city selected");

        self.restaurants = restaurants;
        self.current_city = Some(city.clone());
        self.render();
        Ok(())
    }

    /// Recomputes the visible subset from the panels' checked state and
    /// closes any open panel.
    pub fn apply_filter(&mut self) {
        let _ = self.filter.apply();
        self.render();
    }

    /// Empties the selection on every panel and re-renders.
    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.render();
    }

    /// Grants panel access for wiring input adapters.
    pub fn filter_mut(&mut self) -> &mut CuisineFilter {
        &mut self.filter
    }

    /// Activates entry `number` from the list side.
    pub async fn select_from_list(&mut self, number: usize) -> Result<PresentOutcome, ViewError> {
        self.select(number, SelectionOrigin::List).await
    }

    /// Activates entry `number` from the marker side; additionally
    /// re-centers the map on the restaurant.
    pub async fn select_from_marker(&mut self, number: usize) -> Result<PresentOutcome, ViewError> {
        self.select(number, SelectionOrigin::Marker).await
    }

    async fn select(
        &mut self,
        number: usize,
        origin: SelectionOrigin,
    ) -> Result<PresentOutcome, ViewError> {
        if number == 0 || number > self.visible.len() {
            return Err(ViewError::NoSuchEntry(number));
        }
        let restaurant = self.visible[number - 1].clone();

        self.active = Some(number);
        self.list.set_active(Some(number));

        if matches!(origin, SelectionOrigin::Marker) {
            self.map
                .fly_to(restaurant.restaurant.coordinates(), self.settings.detail_zoom);
        }

        Ok(self.presenter.present(&restaurant).await)
    }

    /// Full refresh of both surfaces from current state.
    fn render(&mut self) {
        let selection = self.filter.selected();
        self.visible = filter_visible(&self.restaurants, &selection);
        self.active = None;

        self.map.clear_markers();
        self.list.set_active(None);

        if self.visible.is_empty() {
            self.list.show_empty_state(EMPTY_STATE_MESSAGE);
            if let Some(city) = &self.current_city {
                self.map.fly_to(city.coordinates(), self.settings.city_zoom);
            }
            return;
        }

        let mut entries = Vec::with_capacity(self.visible.len());
        let mut positions = Vec::with_capacity(self.visible.len());

        for (index, item) in self.visible.iter().enumerate() {
            let number = index + 1;
            let position = item.restaurant.coordinates();

            entries.push(ListEntry {
                number,
                restaurant_id: item.restaurant.id,
                name: item.restaurant.name.clone(),
                cuisines: item.cuisines.iter().map(ToString::to_string).collect(),
                distance: self
                    .user_position
                    .map(|user| format_distance(haversine_km(user, position))),
            });

            self.map.add_marker(&MapMarker {
                number,
                restaurant_id: item.restaurant.id,
                position,
                title: item.restaurant.name.clone(),
            });
            positions.push(position);
        }

        self.list.render_entries(&entries);
        self.map.fit_bounds(&positions);
    }
}
