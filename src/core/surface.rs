//! The geometry and state-flag seam between the carousel controller and
//! whatever actually lays out and paints the cards.
//!
//! All positions are in pixels.  Item bounds are relative to the viewport's
//! left edge, so an item with `left == 0.0` starts exactly at the visible
//! edge and negative values are scrolled off to the left.

/// Horizontal extent of a laid-out item, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// A horizontally scrollable container of ordered items.
///
/// The three flag setters mirror state classes on a web page: snap disabled
/// (`active` on the container), transitions suspended, and the magnified
/// item (`active-slide`).  The controller owns setting and clearing them;
/// what they look like is up to the implementor.
pub trait Surface {
    fn viewport_width(&self) -> f64;

    fn scroll_left(&self) -> f64;

    /// Total scrollable content width.
    fn scroll_width(&self) -> f64;

    /// Move the viewport.  Implementors clamp to their native limits.
    fn set_scroll_left(&mut self, x: f64);

    fn item_count(&self) -> usize;

    /// Current on-screen bounds of item `index`, or `None` if out of range.
    fn item_bounds(&self, index: usize) -> Option<Bounds>;

    /// Spacing between adjacent items.
    fn gap(&self) -> f64;

    /// Enable or disable snap-to-item.  Re-enabling may move the viewport.
    fn set_snap_enabled(&mut self, enabled: bool);

    /// Suspend or restore transform/scale interpolation.
    fn set_transitions_enabled(&mut self, enabled: bool);

    /// Mark `index` as the magnified item; every other item is cleared.
    fn set_active_item(&mut self, index: Option<usize>);
}
