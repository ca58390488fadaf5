//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::carousel::Carousel;
use crate::config::AppConfig;
use crate::core::reviews::Review;
use crate::core::surface::Surface;
use crate::core::track::Track;
use crate::ui::layout::AppLayout;
use crate::ui::magnify::Magnifier;

/// Top-level application state.
pub struct AppState {
    /// The continuity controller and the track it drives.
    pub carousel: Carousel<Track>,
    /// One entry per underlying card; the track shows three copies.
    pub reviews: Vec<Review>,
    /// Per-card magnification animation.
    pub magnifier: Magnifier,
    pub config: AppConfig,
    /// Full terminal area (updated on resize).
    pub terminal_area: Rect,
    /// Clock origin for the carousel's timers.
    pub started: Instant,
    /// Whether the pointer is currently over the track.
    pub hovering: bool,
    /// Card under the pointer when the left button went down.
    pub pressed_item: Option<usize>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(reviews: Vec<Review>, config: AppConfig, terminal_area: Rect) -> Self {
        let layout = AppLayout::from_area(terminal_area);
        let viewport = viewport_px(layout.track_area(), config.display.px_per_cell);
        let track = Track::uniform(
            reviews.len(),
            config.track.card_width_px,
            config.track.gap_px,
            viewport,
        );
        let magnifier = Magnifier::new(track.item_count(), config.display.magnify_speed);
        let carousel = Carousel::new(track, config.carousel.clone());

        Self {
            carousel,
            reviews,
            magnifier,
            config,
            terminal_area,
            started: Instant::now(),
            hovering: false,
            pressed_item: None,
            should_quit: false,
            status_message: None,
        }
    }

    /// Time on the carousel's clock.
    pub fn now(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    /// Column → viewport-relative pixel (cell centre).
    pub fn col_to_px(&self, col: u16) -> f64 {
        let track_area = self.layout().track_area();
        let px = self.config.display.px_per_cell;
        f64::from(col.saturating_sub(track_area.x)) * px + px / 2.0
    }
}

/// Width of `area` in pixels.
pub fn viewport_px(area: Rect, px_per_cell: f64) -> f64 {
    f64::from(area.width) * px_per_cell
}
