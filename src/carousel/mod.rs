//! Infinite-loop carousel behaviour — interaction modes, timers, smooth
//! scrolling, and the continuity controller that ties them together.

pub mod controller;
pub mod mode;
pub mod timers;
pub mod tween;

pub use controller::{Carousel, Input, Notice};
