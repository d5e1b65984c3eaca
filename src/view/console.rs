//! Plain-terminal render surfaces for the CLI commands.

use crate::domain::VideoId;
use crate::geo::Coordinates;
use crate::services::presenter::{EmbedError, EmbedSurface, FrameInspection};
use crate::view::surfaces::{ListEntry, ListSurface, MapMarker, MapSurface};

/// Prints list entries the way `bitemap show` displays them.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleList;

impl ListSurface for ConsoleList {
    fn render_entries(&self, entries: &[ListEntry]) {
        for entry in entries {
            let cuisines = if entry.cuisines.is_empty() {
                String::new()
            } else {
                format!(" [{}]", entry.cuisines.join(", "))
            };
            let distance = entry
                .distance
                .as_ref()
                .map_or_else(String::new, |d| format!(" ({d})"));
            println!("[{}] {}{}{}", entry.number, entry.name, cuisines, distance);
        }
    }

    fn show_empty_state(&self, message: &str) {
        println!("{message}");
    }

    fn set_active(&self, number: Option<usize>) {
        if let Some(n) = number {
            println!("* entry {n} selected");
        }
    }
}

/// Narrates map operations instead of drawing tiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn clear_markers(&self) {}

    fn add_marker(&self, _marker: &MapMarker) {}

    fn fly_to(&self, position: Coordinates, zoom: f64) {
        println!("map: centered on {:.4},{:.4} (zoom {zoom})", position.lat, position.lon);
    }

    fn fit_bounds(&self, positions: &[Coordinates]) {
        println!("map: fitted {} markers", positions.len());
    }
}

/// Describes what a browser would embed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleEmbed;

#[async_trait::async_trait]
impl EmbedSurface for ConsoleEmbed {
    fn show_placeholder(&self, restaurant_name: &str) {
        println!("No video available for {restaurant_name}");
    }

    async fn mount_frame(&self, video: VideoId) -> Result<FrameInspection, EmbedError> {
        println!("video: direct frame for id {video}");
        Ok(FrameInspection::CrossOriginBlocked)
    }

    fn inject_markup(&self, _markup: &str) {
        println!("video: injected stored embed markup");
    }

    fn reload_embeds(&self) {}
}
