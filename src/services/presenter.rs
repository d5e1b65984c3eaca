//! Video presentation for a selected restaurant.
//!
//! Presenting is a two-step strategy list tried in order, each step bounded
//! by a timeout: first a direct embeddable frame for the numeric video id
//! extracted from the stored markup, then the stored markup itself handed to
//! the third-party embed script. No stored reference at all renders a
//! placeholder naming the restaurant.

use crate::domain::VideoId;
use crate::models::EnrichedRestaurant;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-video-id="(\d+)""#).expect("fixed literal pattern")
});

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embed frame failed to render: {0}")]
    Render(String),
}

/// What the surface saw when inspecting a mounted frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameInspection {
    /// Same-origin access was denied; the frame loaded a foreign document,
    /// which is the expected success signal.
    CrossOriginBlocked,
    /// Same-origin access succeeded and the document has content.
    HasContent,
    /// Same-origin access succeeded but the document is empty; the direct
    /// frame never loaded.
    Empty,
}

/// The rendering surface the presenter drives.
#[async_trait::async_trait]
pub trait EmbedSurface: Send + Sync {
    /// Renders a "no video available" placeholder naming the restaurant.
    fn show_placeholder(&self, restaurant_name: &str);

    /// Mounts a direct embeddable frame for the id and reports what the
    /// post-load inspection saw.
    async fn mount_frame(&self, video: VideoId) -> Result<FrameInspection, EmbedError>;

    /// Injects the stored embed markup verbatim.
    fn inject_markup(&self, markup: &str);

    /// Invokes the third-party embed script's load routine over injected
    /// markup.
    fn reload_embeds(&self);
}

/// How a presentation was ultimately rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    Placeholder,
    DirectFrame,
    Fallback,
}

pub struct VideoPresenter {
    surface: Arc<dyn EmbedSurface>,
    frame_timeout: Duration,
}

impl VideoPresenter {
    #[must_use]
    pub const fn new(surface: Arc<dyn EmbedSurface>, frame_timeout: Duration) -> Self {
        Self {
            surface,
            frame_timeout,
        }
    }

    /// Presents the restaurant's featured video, falling back per strategy.
    pub async fn present(&self, restaurant: &EnrichedRestaurant) -> PresentOutcome {
        let Some(video) = &restaurant.featured_video else {
            self.surface.show_placeholder(&restaurant.restaurant.name);
            return PresentOutcome::Placeholder;
        };

        if let Some(id) = extract_video_id(&video.embed_html) {
            match tokio::time::timeout(self.frame_timeout, self.surface.mount_frame(id)).await {
                Ok(Ok(FrameInspection::CrossOriginBlocked | FrameInspection::HasContent)) => {
                    return PresentOutcome::DirectFrame;
                }
                Ok(Ok(FrameInspection::Empty)) => {
                    debug!(%id, "direct frame stayed empty, falling back to stored markup");
                }
                Ok(Err(e)) => {
                    debug!(%id, "direct frame failed: {e}");
                }
                Err(_) => {
                    debug!(%id, "direct frame timed out");
                }
            }
        } else {
            debug!(
                video = %video.id,
                "no video id in stored markup, falling back to stored markup"
            );
        }

        self.surface.inject_markup(&video.embed_html);
        self.surface.reload_embeds();
        PresentOutcome::Fallback
    }
}

/// Extracts the numeric video id from stored embed markup.
#[must_use]
pub fn extract_video_id(markup: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERN
        .captures(markup)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .map(VideoId::new)
}
