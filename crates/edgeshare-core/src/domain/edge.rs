//! Screen-edge thresholds.
//!
//! The master hands control over when its pointer reaches the *right* edge of
//! its screen; the slave hands it back when its pointer reaches the *left*
//! edge.  A small pixel margin keeps pointer jitter right at the boundary from
//! mattering: the master fires as soon as `x >= width - margin`, rather than
//! waiting for the exact last column.

/// Default master margin in pixels.
pub const DEFAULT_RIGHT_EDGE_MARGIN: u32 = 2;

/// Default slave margin: only `x <= 0` releases.
pub const DEFAULT_LEFT_EDGE_MARGIN: i32 = 0;

/// Right-edge trigger used by the master's edge monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RightEdgeThreshold {
    margin: u32,
}

impl RightEdgeThreshold {
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Returns `true` when `x >= screen_width - margin`.
    ///
    /// Computed in `i64` so that a margin wider than the screen (or a zero
    /// width) cannot underflow.
    pub fn is_reached(&self, x: i32, screen_width: u32) -> bool {
        i64::from(x) >= i64::from(screen_width) - i64::from(self.margin)
    }
}

impl Default for RightEdgeThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_RIGHT_EDGE_MARGIN)
    }
}

/// Left-edge trigger used by the slave's edge watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeftEdgeThreshold {
    margin: i32,
}

impl LeftEdgeThreshold {
    pub fn new(margin: i32) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> i32 {
        self.margin
    }

    /// Returns `true` when `x <= margin`.
    pub fn is_reached(&self, x: i32) -> bool {
        x <= self.margin
    }
}

impl Default for LeftEdgeThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_LEFT_EDGE_MARGIN)
    }
}
