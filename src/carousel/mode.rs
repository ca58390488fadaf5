//! Interaction mode — the single owner of "what is the user doing right now".

/// Pointer bookkeeping for an in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub start_x: f64,
    pub last_x: f64,
    /// Set once the pointer has travelled at least the drag threshold.
    pub dragged: bool,
}

impl Drag {
    pub fn new(x: f64) -> Self {
        Self {
            start_x: x,
            last_x: x,
            dragged: false,
        }
    }
}

/// What the carousel is currently doing.
///
/// Native momentum is not a separate state: it only ever arrives as more
/// scroll events, which the quiescence debounce already absorbs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Dragging(Drag),
    /// A smooth scroll is animating and its settle timer has not fired.
    ProgrammaticScroll,
}

impl Mode {
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Mode::Dragging(_))
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Mode::ProgrammaticScroll)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::Dragging(_) => "dragging",
            Mode::ProgrammaticScroll => "scrolling",
        }
    }
}
