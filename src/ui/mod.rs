//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer reads the carousel's track and the review data and turns
//! them into cells on the terminal.  It never mutates carousel state.

pub mod carousel_widget;
pub mod layout;
pub mod magnify;
pub mod theme;
