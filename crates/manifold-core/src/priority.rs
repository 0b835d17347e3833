//! Plugin priority ranking.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric rank deciding which of several competing plugins is tried first.
///
/// Higher values win. Any finite value is allowed; the named constants are
/// presets for the common cases, and values between presets are a legitimate
/// way to slot a plugin relative to an existing one (see
/// [`Priority::offset`]). Comparison is total, so ordering a set of
/// priorities is deterministic even in the presence of negative zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub f64);

impl Priority {
    /// Highest possible priority, tried before everything else.
    pub const FIRST: Priority = Priority(1e300);
    /// Very high priority.
    pub const VERY_HIGH: Priority = Priority(10_000.0);
    /// High priority.
    pub const HIGH: Priority = Priority(100.0);
    /// Default priority.
    pub const NORMAL: Priority = Priority(0.0);
    /// Low priority.
    pub const LOW: Priority = Priority(-100.0);
    /// Very low priority, the conventional rank for universal fallbacks.
    pub const VERY_LOW: Priority = Priority(-10_000.0);
    /// Lowest possible priority, tried after everything else.
    pub const LAST: Priority = Priority(-1e300);

    /// Returns the raw numeric value.
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns a priority shifted by `delta`, for slotting a plugin
    /// immediately before or after another one.
    pub const fn offset(self, delta: f64) -> Priority {
        Priority(self.0 + delta)
    }

    /// Total-order comparison (higher value = greater).
    pub fn total_cmp(&self, other: &Priority) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<f64> for Priority {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
