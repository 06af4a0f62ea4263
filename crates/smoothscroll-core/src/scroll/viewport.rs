//! Host surface the animator scrolls, and the signals that interrupt it

/// A scrollable surface with a horizontal and vertical offset
///
/// `scroll_to` is the host's scroll primitive; clamping to the scrollable
/// range is its responsibility, not the animator's.
pub trait Viewport {
    fn scroll_x(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, x: f64, y: f64);
}

/// Manual-interaction signals that cancel a running animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Mouse wheel / trackpad scroll
    Wheel,
    /// Touch start (a mouse press in terminals)
    TouchStart,
}

/// In-memory viewport with optional bounds that records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryViewport {
    x: f64,
    y: f64,
    max_y: Option<f64>,
    writes: Vec<(f64, f64)>,
}

impl MemoryViewport {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// Clamp vertical writes to `[0, max_y]`
    pub fn with_max_y(mut self, max_y: f64) -> Self {
        self.max_y = Some(max_y);
        self
    }

    /// Every `(x, y)` pair passed to `scroll_to`, before clamping
    pub fn writes(&self) -> &[(f64, f64)] {
        &self.writes
    }

    /// Simulate the user moving the viewport without the animator
    pub fn set_manual(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

impl Viewport for MemoryViewport {
    fn scroll_x(&self) -> f64 {
        self.x
    }

    fn scroll_y(&self) -> f64 {
        self.y
    }

    fn scroll_to(&mut self, x: f64, y: f64) {
        self.writes.push((x, y));
        self.x = x;
        self.y = match self.max_y {
            Some(max) => y.clamp(0.0, max),
            None => y,
        };
    }
}
