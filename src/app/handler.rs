//! Input handling — maps key/mouse events to carousel inputs.
//!
//! Terminal mouse reports arrive in cells; they are converted to
//! viewport-relative pixels before reaching the controller.  Press and
//! release on the same card yield a click, the way a browser synthesises
//! one after `mouseup`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::state::{viewport_px, AppState};
use crate::carousel::{Input, Notice};
use crate::core::surface::Surface;

// ── Keys ────────────────────────────────────────────────────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    state.status_message = None;
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Left | KeyCode::Char('h') => step(state, -1.0),
        KeyCode::Right | KeyCode::Char('l') => step(state, 1.0),
        KeyCode::Char('a') => {
            let enabled = !state.carousel.auto_advance_enabled();
            state.carousel.set_auto_advance(enabled);
            state.status_message = Some(format!(
                "Auto-advance {}",
                if enabled { "on" } else { "off" }
            ));
        }
        _ => {}
    }
}

/// Smooth-scroll one card in `direction` (−1 left, +1 right).
fn step(state: &mut AppState, direction: f64) {
    state.carousel.advance_to(state.now());
    let surface = state.carousel.surface();
    let Some(first) = surface.item_bounds(0) else {
        return;
    };
    let amount = direction * (first.width + surface.gap());
    if !state.carousel.smooth_scroll_by(amount) {
        state.status_message = Some("Still scrolling…".into());
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let now = state.now();
    // Fire due timers first so hit tests see the current offset.
    state.carousel.advance_to(now);
    let layout = state.layout();
    let inside = layout.in_track(mouse.column, mouse.row);
    let x = state.col_to_px(mouse.column);

    // Hover tracking first, so enter/leave bracket everything else.
    if inside && !state.hovering {
        state.hovering = true;
        state.carousel.dispatch(now, Input::PointerEnter);
    } else if !inside && state.hovering {
        state.hovering = false;
        state.pressed_item = None;
        state.carousel.dispatch(now, Input::PointerLeave);
        return;
    }
    if !inside {
        return;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.pressed_item = state.carousel.surface().item_at(x);
            state.carousel.dispatch(now, Input::PointerDown { x });
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            state.carousel.dispatch(now, Input::PointerMove { x });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let released_on = state.carousel.surface().item_at(x);
            state.carousel.dispatch(now, Input::PointerUp);
            if let Some(index) = state.pressed_item.take() {
                if released_on == Some(index) {
                    state.carousel.dispatch(now, Input::Click { index });
                }
            }
        }
        MouseEventKind::ScrollDown => wheel(state, 0.0, 1.0),
        MouseEventKind::ScrollUp => wheel(state, 0.0, -1.0),
        MouseEventKind::ScrollRight => wheel(state, 1.0, 0.0),
        MouseEventKind::ScrollLeft => wheel(state, -1.0, 0.0),
        _ => {}
    }
}

fn wheel(state: &mut AppState, dx: f64, dy: f64) {
    let step = state.config.display.wheel_step_px;
    let now = state.now();
    state.carousel.dispatch(
        now,
        Input::Wheel {
            dx: dx * step,
            dy: dy * step,
        },
    );
}

// ── Layout / frames ─────────────────────────────────────────────

/// Resize the track to the new terminal size and let the carousel react.
pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = Rect::new(0, 0, width, height);
    let viewport = viewport_px(state.layout().track_area(), state.config.display.px_per_cell);
    let now = state.now();
    state.carousel.surface_mut().resize(viewport);
    state.carousel.dispatch(now, Input::Resize);
}

/// One animation frame: timers, tween, warp fence, then magnification.
pub fn on_frame(state: &mut AppState) {
    let now = state.now();
    state.carousel.frame(now);

    let track = state.carousel.surface();
    state
        .magnifier
        .tick(track.active_item(), track.transitions_enabled());

    for notice in state.carousel.take_notices() {
        if let Notice::Rejected = notice {
            tracing::debug!("scroll request dropped while another was in flight");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::reviews;
    use crossterm::event::KeyEventState;
    use std::time::{Duration, Instant};

    fn state() -> AppState {
        let mut config = AppConfig::default();
        config.carousel.auto_advance = false;
        AppState::new(reviews::samples(), config, Rect::new(0, 0, 120, 30))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn track_is_built_from_reviews_and_terminal_width() {
        let s = state();
        let track = s.carousel.surface();
        assert_eq!(track.item_count(), 24);
        assert_eq!(track.viewport_width(), 118.0 * 8.0);
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('q')));
        assert!(s.should_quit);
    }

    #[test]
    fn toggling_auto_advance_reports_status() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('a')));
        assert!(s.carousel.auto_advance_enabled());
        assert_eq!(s.status_message.as_deref(), Some("Auto-advance on"));
    }

    #[test]
    fn arrow_key_starts_a_smooth_scroll() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Right));
        assert!(s.carousel.mode().is_animating());
        handle_key(&mut s, key(KeyCode::Right));
        assert_eq!(s.status_message.as_deref(), Some("Still scrolling…"));
    }

    #[test]
    fn hover_and_leave_track_pointer_state() {
        let mut s = state();
        handle_mouse(&mut s, mouse(MouseEventKind::Moved, 10, 5));
        assert!(s.hovering);
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        assert!(s.carousel.mode().is_dragging());

        // Leaving the pane mid-drag ends the drag.
        handle_mouse(&mut s, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 29));
        assert!(!s.hovering);
        assert!(s.carousel.mode().is_idle());
    }

    #[test]
    fn press_hit_tests_after_due_timers_fire() {
        let mut s = state();
        s.hovering = true;
        // Backdate the clock so the initial positioning is already due.
        s.started = Instant::now()
            .checked_sub(Duration::from_millis(50))
            .unwrap();

        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        // Init jumped to the middle copy (offset 2720), so column 10 is card 8.
        assert_eq!(s.carousel.surface().scroll_left(), 2720.0);
        assert_eq!(s.pressed_item, Some(8));
    }

    #[test]
    fn press_and_release_on_a_card_clicks_it() {
        let mut s = state();
        // Column 10 lands inside a card whether or not init has run yet.
        handle_mouse(&mut s, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        assert!(s.pressed_item.is_some());
        handle_mouse(&mut s, mouse(MouseEventKind::Up(MouseButton::Left), 10, 5));
        assert_eq!(s.pressed_item, None);
        assert!(s.carousel.mode().is_animating());
    }
}
