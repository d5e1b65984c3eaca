use crate::domain::{RestaurantId, VideoId};
use serde::{Deserialize, Serialize};

/// A stored video association for a restaurant.
///
/// `embed_html` is the raw embed markup as saved by the creator flow; the
/// presenter extracts the numeric video id from it when possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRef {
    pub id: VideoId,
    pub restaurant_id: RestaurantId,
    pub embed_html: String,
    #[serde(default)]
    pub featured: bool,
}
