//! End-to-end tests of the map/list view controller over recording surfaces.

use bitemap::clients::BackendError;
use bitemap::clients::backend::CuisineAssignment;
use bitemap::domain::{CityId, CuisineTag, RestaurantId, VideoId};
use bitemap::geo::Coordinates;
use bitemap::models::{City, Restaurant, VideoRef};
use bitemap::services::FilterPanel;
use bitemap::services::filter::{CuisineFilter, InMemoryPanel};
use bitemap::services::presenter::{
    EmbedError, EmbedSurface, FrameInspection, PresentOutcome, VideoPresenter,
};
use bitemap::services::restaurants::{RestaurantDirectory, RestaurantService};
use bitemap::view::controller::{EMPTY_STATE_MESSAGE, MapView, ViewError, ViewSettings};
use bitemap::view::surfaces::{ListEntry, ListSurface, MapMarker, MapSurface};
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct ScriptedDirectory {
    restaurants: Vec<Restaurant>,
    videos: Vec<VideoRef>,
    cuisines: Vec<CuisineAssignment>,
    fail_videos: bool,
}

#[async_trait::async_trait]
impl RestaurantDirectory for ScriptedDirectory {
    async fn fetch_restaurants(&self, city: CityId) -> Result<Vec<Restaurant>, BackendError> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.city_id == city)
            .cloned()
            .collect())
    }

    async fn fetch_featured_videos(
        &self,
        _restaurants: &[RestaurantId],
    ) -> Result<Vec<VideoRef>, BackendError> {
        if self.fail_videos {
            return Err(BackendError::Api {
                code: "503".to_string(),
                message: "unavailable".to_string(),
            });
        }
        Ok(self.videos.clone())
    }

    async fn fetch_cuisine_assignments(
        &self,
        _restaurants: &[RestaurantId],
    ) -> Result<Vec<CuisineAssignment>, BackendError> {
        Ok(self.cuisines.clone())
    }
}

#[derive(Default)]
struct RecordingList {
    entries: Mutex<Vec<ListEntry>>,
    empty_messages: Mutex<Vec<String>>,
    active_history: Mutex<Vec<Option<usize>>>,
}

impl ListSurface for RecordingList {
    fn render_entries(&self, entries: &[ListEntry]) {
        *self.entries.lock().unwrap() = entries.to_vec();
    }

    fn show_empty_state(&self, message: &str) {
        self.entries.lock().unwrap().clear();
        self.empty_messages.lock().unwrap().push(message.to_string());
    }

    fn set_active(&self, number: Option<usize>) {
        self.active_history.lock().unwrap().push(number);
    }
}

#[derive(Default)]
struct RecordingMap {
    markers: Mutex<Vec<MapMarker>>,
    fly_to_calls: Mutex<Vec<(Coordinates, f64)>>,
    cleared: Mutex<usize>,
}

impl MapSurface for RecordingMap {
    fn clear_markers(&self) {
        self.markers.lock().unwrap().clear();
        *self.cleared.lock().unwrap() += 1;
    }

    fn add_marker(&self, marker: &MapMarker) {
        self.markers.lock().unwrap().push(marker.clone());
    }

    fn fly_to(&self, position: Coordinates, zoom: f64) {
        self.fly_to_calls.lock().unwrap().push((position, zoom));
    }

    fn fit_bounds(&self, _positions: &[Coordinates]) {}
}

#[derive(Default)]
struct RecordingEmbed {
    frames: Mutex<Vec<VideoId>>,
    placeholders: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl EmbedSurface for RecordingEmbed {
    fn show_placeholder(&self, restaurant_name: &str) {
        self.placeholders
            .lock()
            .unwrap()
            .push(restaurant_name.to_string());
    }

    async fn mount_frame(&self, video: VideoId) -> Result<FrameInspection, EmbedError> {
        self.frames.lock().unwrap().push(video);
        Ok(FrameInspection::CrossOriginBlocked)
    }

    fn inject_markup(&self, _markup: &str) {}

    fn reload_embeds(&self) {}
}

fn london() -> City {
    City {
        id: CityId::new(1),
        name: "London".to_string(),
        lat: 51.5,
        lon: -0.1,
    }
}

fn restaurant(id: i64, name: &str, lat: f64, lon: f64) -> Restaurant {
    Restaurant {
        id: RestaurantId::new(id),
        name: name.to_string(),
        description: None,
        lat,
        lon,
        city_id: CityId::new(1),
        created_at: Utc::now(),
        owner_id: None,
    }
}

fn assignment(restaurant_id: i64, tag: &str) -> CuisineAssignment {
    CuisineAssignment {
        restaurant_id: RestaurantId::new(restaurant_id),
        tag: CuisineTag::new(tag),
    }
}

struct Harness {
    view: MapView,
    list: Arc<RecordingList>,
    map: Arc<RecordingMap>,
    embed: Arc<RecordingEmbed>,
    panel: Arc<InMemoryPanel>,
}

fn harness(directory: ScriptedDirectory) -> Harness {
    let list = Arc::new(RecordingList::default());
    let map = Arc::new(RecordingMap::default());
    let embed = Arc::new(RecordingEmbed::default());
    let panel = Arc::new(InMemoryPanel::new());

    let mut filter = CuisineFilter::new();
    filter.register_panel(panel.clone());

    let view = MapView::new(
        Arc::new(RestaurantService::new(Arc::new(directory))),
        filter,
        VideoPresenter::new(embed.clone(), Duration::from_millis(100)),
        list.clone(),
        map.clone(),
        ViewSettings::default(),
    );

    Harness {
        view,
        list,
        map,
        embed,
        panel,
    }
}

fn three_restaurants() -> ScriptedDirectory {
    ScriptedDirectory {
        restaurants: vec![
            restaurant(10, "Trattoria Uno", 51.51, -0.12),
            restaurant(11, "Sakura House", 51.52, -0.10),
            restaurant(12, "Bean Scene", 51.50, -0.09),
        ],
        videos: vec![VideoRef {
            id: VideoId::new(500),
            restaurant_id: RestaurantId::new(10),
            embed_html: r#"<blockquote data-video-id="12345"></blockquote>"#.to_string(),
            featured: true,
        }],
        cuisines: vec![
            assignment(10, "Italian"),
            assignment(11, "Japanese"),
            assignment(12, "Coffee"),
            assignment(12, "Japanese"),
        ],
        fail_videos: false,
    }
}

#[tokio::test]
async fn list_and_markers_share_numbering_and_order() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();

    let entries = h.list.entries.lock().unwrap().clone();
    let markers = h.map.markers.lock().unwrap().clone();

    assert_eq!(entries.len(), 3);
    assert_eq!(markers.len(), 3);

    for (entry, marker) in entries.iter().zip(markers.iter()) {
        assert_eq!(entry.number, marker.number);
        assert_eq!(entry.restaurant_id, marker.restaurant_id);
    }
    let numbers: Vec<usize> = entries.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[tokio::test]
async fn rerender_replaces_markers_wholesale() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();
    h.view.apply_filter();

    // Two renders, but never more than one marker per visible restaurant.
    assert_eq!(h.map.markers.lock().unwrap().len(), 3);
    assert!(*h.map.cleared.lock().unwrap() >= 2);
}

#[tokio::test]
async fn empty_city_renders_empty_state() {
    let mut h = harness(ScriptedDirectory::default());
    h.view.select_city(&london()).await.unwrap();

    assert_eq!(
        h.list.empty_messages.lock().unwrap().clone(),
        vec![EMPTY_STATE_MESSAGE.to_string()]
    );
    assert!(h.map.markers.lock().unwrap().is_empty());
    assert_eq!(h.view.visible().len(), 0);
}

#[tokio::test]
async fn cuisine_selection_filters_the_visible_subset() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();

    h.panel.toggle(&CuisineTag::new("Italian"));
    h.panel.toggle(&CuisineTag::new("Coffee"));
    h.view.apply_filter();

    let names: Vec<String> = h
        .view
        .visible()
        .iter()
        .map(|r| r.restaurant.name.clone())
        .collect();
    // Italian-only matches, Japanese-only is excluded, Coffee+Japanese matches.
    assert_eq!(names, vec!["Trattoria Uno", "Bean Scene"]);

    h.view.clear_filter();
    assert_eq!(h.view.visible().len(), 3);
}

#[tokio::test]
async fn selecting_from_list_activates_one_entry_and_presents() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();

    let outcome = h.view.select_from_list(1).await.unwrap();
    assert_eq!(outcome, PresentOutcome::DirectFrame);
    assert_eq!(h.view.active(), Some(1));
    assert_eq!(h.embed.frames.lock().unwrap().clone(), vec![VideoId::new(12345)]);

    // Switching the selection replaces the previous active entry.
    let outcome = h.view.select_from_list(2).await.unwrap();
    assert_eq!(outcome, PresentOutcome::Placeholder);
    assert_eq!(h.view.active(), Some(2));
    assert_eq!(
        h.list.active_history.lock().unwrap().clone(),
        vec![None, Some(1), Some(2)]
    );
}

#[tokio::test]
async fn selecting_from_marker_recenters_the_map() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();

    h.view.select_from_marker(2).await.unwrap();

    let fly_to = h.map.fly_to_calls.lock().unwrap().clone();
    assert_eq!(fly_to.len(), 1);
    assert_eq!(fly_to[0].0, Coordinates::new(51.52, -0.10));

    // List-side selection must not move the map.
    h.view.select_from_list(1).await.unwrap();
    assert_eq!(h.map.fly_to_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn out_of_range_selection_is_rejected() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();

    assert!(matches!(
        h.view.select_from_list(0).await,
        Err(ViewError::NoSuchEntry(0))
    ));
    assert!(matches!(
        h.view.select_from_list(4).await,
        Err(ViewError::NoSuchEntry(4))
    ));
    assert_eq!(h.view.active(), None);
}

#[tokio::test]
async fn filtering_resets_the_active_entry() {
    let mut h = harness(three_restaurants());
    h.view.select_city(&london()).await.unwrap();
    h.view.select_from_list(3).await.unwrap();
    assert_eq!(h.view.active(), Some(3));

    h.panel.toggle(&CuisineTag::new("Italian"));
    h.view.apply_filter();
    assert_eq!(h.view.active(), None);
}

#[tokio::test]
async fn distances_annotate_entries_when_position_is_known() {
    let mut h = harness(three_restaurants());
    h.view.set_user_position(Some(Coordinates::new(51.51, -0.12)));
    h.view.select_city(&london()).await.unwrap();

    let entries = h.list.entries.lock().unwrap().clone();
    // Standing at the first restaurant: metres there, more elsewhere.
    assert_eq!(entries[0].distance.as_deref(), Some("0m"));
    assert!(entries[1].distance.is_some());
    assert!(entries[2].distance.is_some());
}

#[tokio::test]
async fn video_query_failure_still_renders_restaurants() {
    let mut directory = three_restaurants();
    directory.fail_videos = true;
    let mut h = harness(directory);

    h.view.select_city(&london()).await.unwrap();
    assert_eq!(h.list.entries.lock().unwrap().len(), 3);

    // With no video reference joined, selection degrades to the placeholder.
    let outcome = h.view.select_from_list(1).await.unwrap();
    assert_eq!(outcome, PresentOutcome::Placeholder);
    assert_eq!(
        h.embed.placeholders.lock().unwrap().clone(),
        vec!["Trattoria Uno".to_string()]
    );
}

#[tokio::test]
async fn panels_stay_mirrored_through_apply() {
    let mut h = harness(three_restaurants());
    let second_panel = Arc::new(InMemoryPanel::new());
    h.view.filter_mut().register_panel(second_panel.clone());
    h.view.select_city(&london()).await.unwrap();

    h.panel.toggle(&CuisineTag::new("Coffee"));
    second_panel.toggle(&CuisineTag::new("Italian"));
    h.view.apply_filter();

    let expected: BTreeSet<CuisineTag> =
        [CuisineTag::new("Coffee"), CuisineTag::new("Italian")]
            .into_iter()
            .collect();
    assert_eq!(h.panel.checked(), expected);
    assert_eq!(second_panel.checked(), expected);
}
