//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the carousel pane and a bottom status bar.
pub struct AppLayout {
    pub carousel_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),    // carousel pane
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            carousel_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Area inside the carousel pane's border, where cards are drawn.
    pub fn track_area(&self) -> Rect {
        Rect::new(
            self.carousel_area.x.saturating_add(1),
            self.carousel_area.y.saturating_add(1),
            self.carousel_area.width.saturating_sub(2),
            self.carousel_area.height.saturating_sub(2),
        )
    }

    pub fn in_track(&self, col: u16, row: u16) -> bool {
        let a = self.track_area();
        col >= a.x && col < a.x + a.width && row >= a.y && row < a.y + a.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_area_sits_inside_the_border() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.carousel_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.track_area(), Rect::new(1, 1, 78, 21));
        assert!(layout.in_track(1, 1));
        assert!(!layout.in_track(0, 5));
        assert!(!layout.in_track(10, 22));
    }
}
