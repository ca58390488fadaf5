//! Carousel continuity controller.
//!
//! Keeps a tripled track feeling infinite: whenever scrolling comes to rest
//! with the centred card in the first or last copy, the viewport is shifted
//! by exactly one copy's on-screen distance so the same card sits in the
//! middle copy instead.  The shift happens with transitions and snap
//! suspended, and they only come back after two animation frames so the
//! corrected frame is painted before anything interpolates again.
//!
//! Everything is driven through a single-threaded event queue.  The host
//! feeds [`Input`]s, calls [`Carousel::frame`] once per animation frame, and
//! supplies the clock.  Timers (debounces, settle, auto-advance) live in a
//! [`TimerQueue`] over that clock, so the whole controller is deterministic.

use std::collections::VecDeque;
use std::time::Duration;

use super::mode::{Drag, Mode};
use super::timers::{TimerKind, TimerQueue};
use super::tween::Tween;
use crate::config::CarouselSettings;
use crate::core::surface::Surface;
use crate::core::track::COPIES;

/// Pointer, wheel, and layout input from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    PointerDown { x: f64 },
    PointerMove { x: f64 },
    PointerUp,
    PointerEnter,
    PointerLeave,
    /// A click that landed on item `index`.
    Click { index: usize },
    Wheel { dx: f64, dy: f64 },
    /// The viewport was resized (the host has already resized the surface).
    Resize,
}

/// Observable outcomes, drained by the host for logging or display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notice {
    Warped { from: usize, to: usize, delta: f64 },
    Advanced { amount: f64 },
    /// A smooth scroll was requested while another was in flight.
    Rejected,
}

#[derive(Debug, Clone, Copy)]
enum Event {
    Input(Input),
    Scroll,
    Timer(TimerKind),
}

pub struct Carousel<S: Surface> {
    surface: S,
    settings: CarouselSettings,
    mode: Mode,
    /// Set when a drag crossed the threshold; cleared on the next press.
    suppress_click: bool,
    timers: TimerQueue,
    queue: VecDeque<Event>,
    now: Duration,
    tween: Option<Tween>,
    /// Frames left before transitions and snap come back after a warp.
    fence: Option<u8>,
    /// Re-enable snap on the next frame (after a settle).
    snap_next_frame: bool,
    auto_advance: bool,
    hovering: bool,
    active: Option<usize>,
    warps: u64,
    notices: Vec<Notice>,
}

impl<S: Surface> Carousel<S> {
    /// Wrap `surface`.  Initial positioning runs once `init_delay` has
    /// passed on the controller's clock, which starts at zero.
    pub fn new(surface: S, settings: CarouselSettings) -> Self {
        let mut carousel = Self {
            surface,
            auto_advance: settings.auto_advance,
            settings,
            mode: Mode::Idle,
            suppress_click: false,
            timers: TimerQueue::new(),
            queue: VecDeque::new(),
            now: Duration::ZERO,
            tween: None,
            fence: None,
            snap_next_frame: false,
            hovering: false,
            active: None,
            warps: 0,
            notices: Vec::new(),
        };
        carousel
            .timers
            .schedule(TimerKind::Init, carousel.settings.init_delay());
        carousel.start_auto_advance();
        carousel
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct surface access for host-side layout changes (resize).
    /// Follow up with [`Input::Resize`].
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn active_item(&self) -> Option<usize> {
        self.active
    }

    pub fn warp_count(&self) -> u64 {
        self.warps
    }

    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_advance
    }

    /// Items per copy.
    pub fn segment_len(&self) -> usize {
        self.surface.item_count() / COPIES
    }

    /// Which copy (0, 1, 2) `index` belongs to.
    pub fn segment_of(&self, index: usize) -> Option<usize> {
        match self.segment_len() {
            0 => None,
            m => Some((index / m).min(COPIES - 1)),
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ── driving ────────────────────────────────────────────────

    /// Fire every timer due at or before `now`, in deadline order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((at, kind)) = self.timers.pop_due(now) {
            self.now = at.max(self.now);
            self.queue.push_back(Event::Timer(kind));
            self.drain();
        }
        self.now = now.max(self.now);
    }

    /// Deliver one input at `now`.
    pub fn dispatch(&mut self, now: Duration, input: Input) {
        self.advance_to(now);
        self.queue.push_back(Event::Input(input));
        self.drain();
    }

    /// One animation-frame boundary at `now`.
    pub fn frame(&mut self, now: Duration) {
        self.advance_to(now);

        if let Some(tween) = self.tween {
            let x = tween.sample(self.now);
            self.with_surface(|s| s.set_scroll_left(x));
            if tween.is_done(self.now) {
                self.tween = None;
            }
        }

        match self.fence {
            Some(n) if n > 1 => self.fence = Some(n - 1),
            Some(_) => {
                self.fence = None;
                self.snap_next_frame = false;
                self.surface.set_transitions_enabled(true);
                self.try_enable_snap();
            }
            None if self.snap_next_frame && self.tween.is_none() => {
                self.snap_next_frame = false;
                self.try_enable_snap();
            }
            None => {}
        }

        self.drain();
    }

    pub fn set_auto_advance(&mut self, enabled: bool) {
        self.auto_advance = enabled;
        if enabled && !self.hovering {
            self.start_auto_advance();
        } else {
            self.timers.cancel(TimerKind::AutoAdvance);
        }
    }

    fn drain(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            match event {
                Event::Input(input) => self.on_input(input),
                Event::Scroll => self.on_scroll(),
                Event::Timer(kind) => self.on_timer(kind),
            }
        }
    }

    /// Run `f` against the surface and queue a scroll event if it moved.
    fn with_surface<R>(&mut self, f: impl FnOnce(&mut S) -> R) -> R {
        let before = self.surface.scroll_left();
        let result = f(&mut self.surface);
        if self.surface.scroll_left() != before {
            self.queue.push_back(Event::Scroll);
        }
        result
    }

    // ── operations ─────────────────────────────────────────────

    /// Find the item whose centre is nearest the viewport centre (lowest
    /// index wins ties), mark it active, and return it.
    pub fn locate_active_item(&mut self) -> Option<usize> {
        let center = self.surface.viewport_width() / 2.0;
        let mut best: Option<(usize, f64)> = None;
        for index in 0..self.surface.item_count() {
            let Some(bounds) = self.surface.item_bounds(index) else {
                continue;
            };
            let distance = (bounds.center() - center).abs();
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }
        self.active = best.map(|(index, _)| index);
        self.surface.set_active_item(self.active);
        self.active
    }

    /// Shift the viewport into the middle copy if the active item sits in
    /// the first or last copy.  Returns the applied shift.
    pub fn correct_continuity(&mut self) -> Option<f64> {
        if !self.mode.is_idle() || self.fence.is_some() {
            return None;
        }

        let active = self.locate_active_item()?;
        let m = self.segment_len();
        if m == 0 {
            return None;
        }
        let target = match active / m {
            0 => active + m,
            1 => return None,
            _ => active.checked_sub(m)?,
        };
        if target >= self.surface.item_count() {
            return None;
        }

        let from = self.surface.item_bounds(active)?.left;
        let to = self.surface.item_bounds(target)?.left;
        let delta = to - from;
        if !delta.is_finite() {
            return None;
        }
        // The host clamps the offset; only the part that lands counts.
        let before = self.surface.scroll_left();
        let max = (self.surface.scroll_width() - self.surface.viewport_width()).max(0.0);
        let applied = (before + delta).clamp(0.0, max) - before;
        if applied == 0.0 {
            return None;
        }

        self.surface.set_transitions_enabled(false);
        self.with_surface(|s| {
            s.set_snap_enabled(false);
            s.set_scroll_left(before + applied);
        });
        self.locate_active_item();
        self.fence = Some(self.settings.restore_frames.max(1));
        if let Some(tween) = self.tween.as_mut() {
            tween.shift(applied);
        }

        self.warps += 1;
        self.notices.push(Notice::Warped {
            from: active,
            to: target,
            delta: applied,
        });
        tracing::info!(from = active, to = target, delta = applied, "continuity warp");
        Some(applied)
    }

    /// Animate the viewport by `amount`.  Rejected (returns `false`) unless
    /// the carousel is idle.
    pub fn smooth_scroll_by(&mut self, amount: f64) -> bool {
        if !self.mode.is_idle() {
            tracing::debug!(amount, mode = self.mode.label(), "smooth scroll rejected");
            self.notices.push(Notice::Rejected);
            return false;
        }

        self.with_surface(|s| s.set_snap_enabled(false));
        self.mode = Mode::ProgrammaticScroll;
        self.timers.cancel(TimerKind::Quiescence);
        self.snap_next_frame = false;

        let from = self.surface.scroll_left();
        self.tween = Some(Tween::new(
            from,
            from + amount,
            self.now,
            self.settings.scroll_animation(),
        ));
        self.timers
            .schedule(TimerKind::Settle, self.now + self.settings.settle());
        tracing::debug!(amount, "smooth scroll started");
        true
    }

    /// Jump to the start of the middle copy if the viewport is still near
    /// the very beginning of the track.
    fn init_position(&mut self) {
        if self.surface.scroll_left() < self.settings.init_jump_threshold_px {
            self.with_surface(|s| {
                let middle = s.scroll_width() / COPIES as f64;
                s.set_scroll_left(middle);
            });
        }
    }

    fn try_enable_snap(&mut self) {
        if self.mode.is_idle() && self.fence.is_none() {
            self.with_surface(|s| s.set_snap_enabled(true));
        }
    }

    fn start_auto_advance(&mut self) {
        self.timers.cancel(TimerKind::AutoAdvance);
        if self.auto_advance {
            self.timers.schedule(
                TimerKind::AutoAdvance,
                self.now + self.settings.auto_advance_period(),
            );
        }
    }

    // ── handlers ───────────────────────────────────────────────

    fn on_input(&mut self, input: Input) {
        match input {
            Input::PointerDown { x } => self.on_pointer_down(x),
            Input::PointerMove { x } => self.on_pointer_move(x),
            Input::PointerUp => self.stop_drag(),
            Input::PointerEnter => {
                self.hovering = true;
                self.timers.cancel(TimerKind::AutoAdvance);
            }
            Input::PointerLeave => {
                self.hovering = false;
                self.stop_drag();
                self.start_auto_advance();
            }
            Input::Click { index } => self.on_click(index),
            Input::Wheel { dx, dy } => self.on_wheel(dx + dy),
            Input::Resize => {
                self.init_position();
                self.locate_active_item();
            }
        }
    }

    fn on_scroll(&mut self) {
        self.locate_active_item();
        self.timers
            .schedule(TimerKind::Quiescence, self.now + self.settings.quiescence());
    }

    fn on_timer(&mut self, kind: TimerKind) {
        tracing::debug!(?kind, at = ?self.now, "timer fired");
        match kind {
            TimerKind::Init => {
                self.init_position();
                self.locate_active_item();
            }
            TimerKind::Quiescence => {
                if self.mode.is_idle() {
                    self.correct_continuity();
                }
            }
            TimerKind::WheelQuiescence => self.try_enable_snap(),
            TimerKind::Settle => {
                if self.mode.is_animating() {
                    self.mode = Mode::Idle;
                    self.correct_continuity();
                    self.snap_next_frame = true;
                }
            }
            TimerKind::AutoAdvance => self.on_auto_advance(),
        }
    }

    fn on_pointer_down(&mut self, x: f64) {
        if self.mode.is_animating() {
            tracing::debug!("programmatic scroll interrupted by pointer");
            self.tween = None;
            self.timers.cancel(TimerKind::Settle);
            self.snap_next_frame = false;
        }
        self.mode = Mode::Dragging(Drag::new(x));
        self.suppress_click = false;
        self.with_surface(|s| s.set_snap_enabled(false));
        self.timers.cancel(TimerKind::Quiescence);
        self.timers.cancel(TimerKind::AutoAdvance);
    }

    fn on_pointer_move(&mut self, x: f64) {
        let Mode::Dragging(mut drag) = self.mode else {
            return;
        };
        if !drag.dragged && (x - drag.start_x).abs() < self.settings.drag_threshold_px {
            return;
        }
        drag.dragged = true;
        let walk = (x - drag.last_x) * self.settings.drag_speed;
        drag.last_x = x;
        self.mode = Mode::Dragging(drag);
        self.suppress_click = true;
        self.with_surface(|s| s.set_scroll_left(s.scroll_left() - walk));
    }

    fn stop_drag(&mut self) {
        if !self.mode.is_dragging() {
            return;
        }
        self.mode = Mode::Idle;
        self.try_enable_snap();

        // A drag that came to rest without snapping leaves nothing to
        // trigger the quiescence check, so arm it once here.
        let scroll_queued = self.queue.iter().any(|e| matches!(e, Event::Scroll));
        if !scroll_queued && !self.timers.is_pending(TimerKind::Quiescence) {
            self.timers
                .schedule(TimerKind::Quiescence, self.now + self.settings.quiescence());
        }
    }

    fn on_click(&mut self, index: usize) {
        if self.suppress_click {
            tracing::debug!(index, "click after drag ignored");
            return;
        }
        let Some(bounds) = self.surface.item_bounds(index) else {
            return;
        };
        let offset = bounds.center() - self.surface.viewport_width() / 2.0;
        self.smooth_scroll_by(offset);
    }

    fn on_wheel(&mut self, delta: f64) {
        if self.tween.take().is_some() {
            tracing::debug!("smooth scroll animation cut short by wheel");
        }
        self.with_surface(|s| s.set_snap_enabled(false));
        self.timers.cancel(TimerKind::Quiescence);
        self.timers.schedule(
            TimerKind::WheelQuiescence,
            self.now + self.settings.wheel_quiescence(),
        );
        self.with_surface(|s| s.set_scroll_left(s.scroll_left() + delta));
    }

    fn on_auto_advance(&mut self) {
        // Interval semantics: the next tick is due one period after this one.
        if self.auto_advance && !self.hovering {
            self.timers.schedule(
                TimerKind::AutoAdvance,
                self.now + self.settings.auto_advance_period(),
            );
        }
        if self.mode.is_dragging() || self.mode.is_animating() {
            tracing::debug!(mode = self.mode.label(), "auto-advance skipped");
            return;
        }
        let Some(first) = self.surface.item_bounds(0) else {
            return;
        };
        let amount = first.width + self.surface.gap();
        if self.smooth_scroll_by(amount) {
            self.notices.push(Notice::Advanced { amount });
            tracing::info!(amount, "auto-advance");
        }
    }
}
