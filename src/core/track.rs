//! Simulated horizontal scroll container holding three copies of the cards.
//!
//! Every card is followed by one gap, so a single copy spans exactly
//! `scroll_width / 3` and the middle copy starts at `scroll_width / 3`.

use super::surface::{Bounds, Surface};

/// Number of copies the underlying cards are repeated into.
pub const COPIES: usize = 3;

/// A row of cards with per-card widths, laid out left to right.
#[derive(Debug, Clone)]
pub struct Track {
    widths: Vec<f64>,
    /// Left edge of every card in content coordinates (prefix sums).
    lefts: Vec<f64>,
    gap: f64,
    viewport_width: f64,
    scroll_left: f64,
    snap_enabled: bool,
    transitions_enabled: bool,
    active: Option<usize>,
}

impl Track {
    /// Build a track from the widths of one copy, repeated [`COPIES`] times.
    pub fn tripled(widths: &[f64], gap: f64, viewport_width: f64) -> Self {
        let widths: Vec<f64> = widths
            .iter()
            .copied()
            .cycle()
            .take(widths.len() * COPIES)
            .collect();

        let mut lefts = Vec::with_capacity(widths.len());
        let mut x = 0.0;
        for w in &widths {
            lefts.push(x);
            x += w + gap;
        }

        Self {
            widths,
            lefts,
            gap,
            viewport_width: viewport_width.max(0.0),
            scroll_left: 0.0,
            snap_enabled: true,
            transitions_enabled: true,
            active: None,
        }
    }

    /// Uniform-width convenience constructor.
    pub fn uniform(count: usize, width: f64, gap: f64, viewport_width: f64) -> Self {
        Self::tripled(&vec![width; count], gap, viewport_width)
    }

    /// Cards per copy.
    pub fn segment_len(&self) -> usize {
        self.widths.len() / COPIES
    }

    /// Which underlying card a rendered index shows.
    pub fn source_index(&self, index: usize) -> usize {
        match self.segment_len() {
            0 => 0,
            m => index % m,
        }
    }

    /// Left edge of `index` in content coordinates.
    pub fn item_left(&self, index: usize) -> Option<f64> {
        self.lefts.get(index).copied()
    }

    /// Card under viewport-relative position `x`, if any (gaps hit nothing).
    pub fn item_at(&self, x: f64) -> Option<usize> {
        let content_x = x + self.scroll_left;
        let index = self.lefts.partition_point(|&l| l <= content_x).checked_sub(1)?;
        (content_x < self.lefts[index] + self.widths[index]).then_some(index)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.scroll_width() - self.viewport_width).max(0.0)
    }

    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn active_item(&self) -> Option<usize> {
        self.active
    }

    /// Change the viewport width and re-clamp the offset.
    pub fn resize(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width.max(0.0);
        self.scroll_left = self.scroll_left.clamp(0.0, self.max_scroll());
    }

    /// Offset that puts the card nearest the viewport centre dead centre.
    fn snap_target(&self) -> Option<f64> {
        let center = self.scroll_left + self.viewport_width / 2.0;
        let (index, _) = self
            .lefts
            .iter()
            .zip(&self.widths)
            .map(|(l, w)| (l + w / 2.0 - center).abs())
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            })?;
        Some(self.lefts[index] + self.widths[index] / 2.0 - self.viewport_width / 2.0)
    }
}

impl Surface for Track {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn scroll_width(&self) -> f64 {
        self.widths.iter().sum::<f64>() + self.gap * self.widths.len() as f64
    }

    fn set_scroll_left(&mut self, x: f64) {
        self.scroll_left = if x.is_finite() {
            x.clamp(0.0, self.max_scroll())
        } else {
            self.scroll_left
        };
    }

    fn item_count(&self) -> usize {
        self.widths.len()
    }

    fn item_bounds(&self, index: usize) -> Option<Bounds> {
        let left = self.item_left(index)?;
        let width = self.widths.get(index)?;
        Some(Bounds::new(left - self.scroll_left, *width))
    }

    fn gap(&self) -> f64 {
        self.gap
    }

    fn set_snap_enabled(&mut self, enabled: bool) {
        let was = self.snap_enabled;
        self.snap_enabled = enabled;
        if enabled && !was {
            if let Some(target) = self.snap_target() {
                self.set_scroll_left(target);
            }
        }
    }

    fn set_transitions_enabled(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    fn set_active_item(&mut self, index: Option<usize>) {
        self.active = index.filter(|&i| i < self.widths.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tripling_repeats_widths_and_spans_three_equal_segments() {
        let track = Track::tripled(&[100.0, 200.0], 10.0, 300.0);
        assert_eq!(track.item_count(), 6);
        assert_eq!(track.segment_len(), 2);
        assert_eq!(track.item_bounds(3).map(|b| b.width), Some(200.0));
        assert_eq!(track.scroll_width(), 3.0 * 320.0);
        assert_eq!(track.item_left(2), Some(320.0));
        assert_eq!(track.item_left(4), Some(640.0));
        assert_eq!(track.source_index(5), 1);
    }

    #[test]
    fn scroll_is_clamped_to_native_limits() {
        let mut track = Track::uniform(4, 100.0, 0.0, 250.0);
        track.set_scroll_left(-40.0);
        assert_eq!(track.scroll_left(), 0.0);
        track.set_scroll_left(10_000.0);
        assert_eq!(track.scroll_left(), 1200.0 - 250.0);
        track.set_scroll_left(f64::NAN);
        assert_eq!(track.scroll_left(), 950.0);
    }

    #[test]
    fn bounds_are_viewport_relative() {
        let mut track = Track::uniform(4, 100.0, 20.0, 300.0);
        track.set_scroll_left(150.0);
        let b = track.item_bounds(2).unwrap();
        assert_eq!(b.left, 240.0 - 150.0);
        assert_eq!(b.center(), 140.0);
        assert!(track.item_bounds(12).is_none());
    }

    #[test]
    fn re_enabling_snap_centres_the_nearest_card() {
        let mut track = Track::uniform(4, 100.0, 20.0, 300.0);
        track.set_snap_enabled(false);
        // Viewport centre lands at 680; card 5 (600..700) is nearest.
        track.set_scroll_left(530.0);
        track.set_snap_enabled(true);
        assert_eq!(track.scroll_left(), 500.0);
    }

    #[test]
    fn enabling_snap_twice_does_not_move_again() {
        let mut track = Track::uniform(4, 100.0, 20.0, 300.0);
        track.set_scroll_left(530.0);
        track.set_snap_enabled(true);
        assert_eq!(track.scroll_left(), 530.0);
    }

    #[test]
    fn hit_testing_skips_gaps() {
        let mut track = Track::uniform(4, 100.0, 20.0, 300.0);
        track.set_scroll_left(100.0);
        assert_eq!(track.item_at(30.0), Some(1));
        assert_eq!(track.item_at(15.0), None);
        assert_eq!(track.item_at(-150.0), None);
        assert_eq!(track.item_at(0.0), None);
        assert_eq!(track.item_at(-100.0), Some(0));
    }

    #[test]
    fn resize_reclamps_offset() {
        let mut track = Track::uniform(2, 100.0, 0.0, 100.0);
        track.set_scroll_left(500.0);
        track.resize(400.0);
        assert_eq!(track.scroll_left(), 200.0);
    }
}
